//! Shared test utilities for fellow-db unit tests.

#[cfg(test)]
pub(crate) mod helpers {
    use fellow_core::entities::UserRecord;

    use crate::FellowDb;
    use crate::local::{LocalCatalog, LocalDirectory};
    use crate::service::FellowService;

    /// Create an in-memory `FellowService` backed by the local adapters.
    pub async fn test_service() -> FellowService {
        let db = FellowDb::open_in_memory().await.unwrap();
        FellowService::from_db(db)
    }

    /// A user record whose names and email derive from `id`.
    pub fn user(id: &str) -> UserRecord {
        UserRecord {
            id: id.to_string(),
            username: id.to_string(),
            first_name: capitalize(id),
            last_name: "Reader".to_string(),
            email: format!("{id}@example.com"),
        }
    }

    /// Register users in the local directory.
    pub async fn add_users(svc: &FellowService, ids: &[&str]) {
        let directory = LocalDirectory::new(svc.db().clone());
        for id in ids {
            directory.register(&user(id)).await.unwrap();
        }
    }

    /// Add `n` catalog items and associate them with `user_id`.
    pub async fn add_items(svc: &FellowService, user_id: &str, n: usize) {
        let catalog = LocalCatalog::new(svc.db().clone());
        for i in 0..n {
            let item = catalog
                .add_item(&format!("{user_id} book {i}"), Some("Anon"))
                .await
                .unwrap();
            catalog.assign(user_id, &item.id).await.unwrap();
        }
    }

    /// Follow and accept in one step; returns the accepted edge id.
    pub async fn befriend(svc: &FellowService, follower: &str, target: &str) -> String {
        let outcome = svc.follow(follower, target).await.unwrap();
        svc.accept_request(&outcome.edge.id, target).await.unwrap();
        outcome.edge.id
    }

    fn capitalize(s: &str) -> String {
        let mut chars = s.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(chars).collect()
        })
    }
}
