//! Search and profile composition.
//!
//! Joins relationship data with identity directory and catalog lookups to
//! build the views handed to transports.

use std::collections::{HashMap, HashSet};

use fellow_core::entities::UserRecord;
use fellow_core::enums::FollowStatus;
use fellow_core::errors::CoreError;
use fellow_core::views::{PendingRequest, ProfileView, SearchView, UserSearchResult};

use crate::error::DatabaseError;
use crate::service::FellowService;

impl FellowService {
    /// Users with an accepted edge pointing at `user_id`.
    pub async fn list_followers(&self, user_id: &str) -> Result<Vec<UserRecord>, DatabaseError> {
        let ids: Vec<String> = self
            .edges_to(user_id, Some(FollowStatus::Accepted))
            .await?
            .into_iter()
            .map(|edge| edge.follower_id)
            .collect();
        self.resolve_users(&ids).await
    }

    /// Users `user_id` follows with an accepted edge.
    pub async fn list_following(&self, user_id: &str) -> Result<Vec<UserRecord>, DatabaseError> {
        let ids: Vec<String> = self
            .edges_from(user_id, Some(FollowStatus::Accepted))
            .await?
            .into_iter()
            .map(|edge| edge.following_id)
            .collect();
        self.resolve_users(&ids).await
    }

    /// Pending requests for `user_id` joined with the requesting users,
    /// newest request first.
    pub async fn pending_inbox(&self, user_id: &str) -> Result<Vec<PendingRequest>, DatabaseError> {
        let edges = self.list_pending_requests(user_id).await?;
        let ids: Vec<String> = edges.iter().map(|edge| edge.follower_id.clone()).collect();
        let mut users: HashMap<String, UserRecord> = self
            .resolve_users(&ids)
            .await?
            .into_iter()
            .map(|user| (user.id.clone(), user))
            .collect();

        Ok(edges
            .into_iter()
            .filter_map(|edge| {
                let follower = users.remove(&edge.follower_id)?;
                Some(PendingRequest { edge, follower })
            })
            .collect())
    }

    /// Profile of `subject_id` as seen by `viewer_id`.
    ///
    /// A missing or blank subject means the viewer's own profile.
    ///
    /// # Errors
    ///
    /// `NotFound` if the subject is unknown to the identity directory.
    pub async fn get_profile(
        &self,
        viewer_id: &str,
        subject_id: Option<&str>,
    ) -> Result<ProfileView, DatabaseError> {
        let subject_id = subject_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .unwrap_or(viewer_id);

        let user = self
            .directory()
            .resolve_by_id(subject_id)
            .await?
            .ok_or_else(|| CoreError::user_not_found(subject_id))?;

        let is_current_user = subject_id == viewer_id;
        let relation = if is_current_user {
            None
        } else {
            self.find_edge_by_pair(viewer_id, subject_id)
                .await?
                .map(|edge| edge.status)
        };
        let (followers_count, following_count) = self.follow_counts(subject_id).await?;
        let content_count = self.catalog().count_associated_with(subject_id).await?;
        let items = self.catalog().items_associated_with(subject_id).await?;

        Ok(ProfileView {
            user,
            followers_count,
            following_count,
            is_following: relation == Some(FollowStatus::Accepted),
            is_current_user,
            relation,
            content_count,
            items,
        })
    }

    /// Search users by free text on behalf of `viewer_id`.
    ///
    /// The query is trimmed; a blank query returns no results without
    /// consulting the directory. The viewer never appears in the results,
    /// repeated ids keep their first occurrence, and directory order is kept.
    pub async fn search(&self, viewer_id: &str, query: &str) -> Result<SearchView, DatabaseError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(SearchView::empty(query));
        }

        let mut seen = HashSet::new();
        let candidates: Vec<UserRecord> = self
            .directory()
            .search_by_text(query)
            .await?
            .into_iter()
            .filter(|user| user.id != viewer_id && seen.insert(user.id.clone()))
            .collect();

        let ids: Vec<String> = candidates.iter().map(|user| user.id.clone()).collect();
        let stats = self.subject_stats_batch(viewer_id, &ids).await?;

        let users = candidates
            .into_iter()
            .map(|user| {
                let user_stats = stats.get(&user.id).copied().unwrap_or_default();
                UserSearchResult::new(user, user_stats, false)
            })
            .collect();

        Ok(SearchView {
            query: query.to_string(),
            users,
        })
    }

    /// Resolve ids through the directory, logging ids it no longer knows.
    async fn resolve_users(&self, ids: &[String]) -> Result<Vec<UserRecord>, DatabaseError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let users = self.directory().resolve_many(ids).await?;
        if users.len() < ids.len() {
            let known: HashSet<&str> = users.iter().map(|user| user.id.as_str()).collect();
            for id in ids.iter().filter(|id| !known.contains(id.as_str())) {
                tracing::warn!(user_id = %id, "edge references a user unknown to the directory");
            }
        }
        Ok(users)
    }
}
