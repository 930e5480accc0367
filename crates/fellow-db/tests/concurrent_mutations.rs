//! Concurrent mutations on a single pair or edge.
//!
//! Tasks share one service (and so one connection); the unique pair index and
//! the compare-and-set updates decide the winners.

use fellow_core::entities::UserRecord;
use fellow_core::enums::FollowStatus;
use fellow_db::local::LocalDirectory;
use fellow_db::service::FellowService;
use fellow_db::retry::RetryConfig;

async fn service(ids: &[&str]) -> FellowService {
    let svc = FellowService::new_local(":memory:", RetryConfig::default())
        .await
        .unwrap();
    let directory = LocalDirectory::new(svc.db().clone());
    for id in ids {
        directory
            .register(&UserRecord {
                id: (*id).to_string(),
                username: (*id).to_string(),
                first_name: String::new(),
                last_name: String::new(),
                email: format!("{id}@example.com"),
            })
            .await
            .unwrap();
    }
    svc
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_follow_creates_one_edge() {
    let svc = service(&["alice", "bob"]).await;

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let svc = svc.clone();
            tokio::spawn(async move { svc.follow("alice", "bob").await })
        })
        .collect();

    let mut edge_ids = Vec::new();
    for handle in handles {
        let outcome = handle.await.unwrap().unwrap();
        edge_ids.push(outcome.edge.id);
    }
    edge_ids.dedup();
    assert_eq!(edge_ids.len(), 1, "every caller should see the same edge");

    let edges = svc.edges_to("bob", None).await.unwrap();
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].status, FollowStatus::Pending);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn mutual_follows_are_independent() {
    let svc = service(&["alice", "bob"]).await;

    let a = {
        let svc = svc.clone();
        tokio::spawn(async move { svc.follow("alice", "bob").await })
    };
    let b = {
        let svc = svc.clone();
        tokio::spawn(async move { svc.follow("bob", "alice").await })
    };
    let ab = a.await.unwrap().unwrap().edge;
    let ba = b.await.unwrap().unwrap().edge;

    assert_ne!(ab.id, ba.id);
    assert_eq!(svc.edges_from("alice", None).await.unwrap().len(), 1);
    assert_eq!(svc.edges_from("bob", None).await.unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_accept_has_one_winner() {
    let svc = service(&["alice", "bob"]).await;
    let edge = svc.follow("alice", "bob").await.unwrap().edge;

    let handles: Vec<_> = (0..2)
        .map(|_| {
            let svc = svc.clone();
            let edge_id = edge.id.clone();
            tokio::spawn(async move { svc.accept_request(&edge_id, "bob").await })
        })
        .collect();

    let mut wins = 0;
    let mut invalid_state = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(edge) => {
                assert_eq!(edge.status, FollowStatus::Accepted);
                wins += 1;
            }
            Err(err) if err.is_invalid_state() => invalid_state += 1,
            Err(err) => panic!("unexpected error: {err}"),
        }
    }
    assert_eq!((wins, invalid_state), (1, 1));
    assert_eq!(svc.followers_count("bob").await.unwrap(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn accept_racing_reject_settles_on_one_status() {
    let svc = service(&["alice", "bob"]).await;
    let edge = svc.follow("alice", "bob").await.unwrap().edge;

    let accept = {
        let svc = svc.clone();
        let id = edge.id.clone();
        tokio::spawn(async move { svc.accept_request(&id, "bob").await })
    };
    let reject = {
        let svc = svc.clone();
        let id = edge.id.clone();
        tokio::spawn(async move { svc.reject_request(&id, "bob").await })
    };
    let accepted = accept.await.unwrap();
    let rejected = reject.await.unwrap();
    assert!(accepted.is_ok() ^ rejected.is_ok());

    let stored = svc.get_edge(&edge.id).await.unwrap().unwrap();
    let expected = if accepted.is_ok() {
        FollowStatus::Accepted
    } else {
        FollowStatus::Rejected
    };
    assert_eq!(stored.status, expected);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn unfollow_during_accept_never_resurrects_edge() {
    let svc = service(&["alice", "bob"]).await;
    let edge = svc.follow("alice", "bob").await.unwrap().edge;

    let accept = {
        let svc = svc.clone();
        let id = edge.id.clone();
        tokio::spawn(async move { svc.accept_request(&id, "bob").await })
    };
    let unfollow = {
        let svc = svc.clone();
        tokio::spawn(async move { svc.unfollow("alice", "bob").await })
    };

    let accepted = accept.await.unwrap();
    let removed = unfollow.await.unwrap().unwrap();
    assert_eq!(removed.map(|e| e.id), Some(edge.id.clone()));

    // Either the accept landed first and was then removed, or it found the
    // edge gone.
    if let Err(err) = accepted {
        assert!(err.is_not_found());
    }
    assert_eq!(svc.find_edge_by_pair("alice", "bob").await.unwrap(), None);
    assert_eq!(svc.followers_count("bob").await.unwrap(), 0);
}
