//! Collaborator seams: the identity directory and the content catalog.
//!
//! Fellow never owns user accounts or catalog content. It reaches both through
//! these object-safe traits so that the hosting application can plug in its
//! own backends. `fellow-db` ships libSQL-backed implementations.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::entities::{ContentItem, UserRecord};
use crate::errors::CoreError;

/// Resolves opaque user ids to user records.
#[async_trait]
pub trait IdentityDirectory: Send + Sync {
    /// Look up a single user. `Ok(None)` means the id is unknown.
    async fn resolve_by_id(&self, id: &str) -> Result<Option<UserRecord>, CoreError>;

    /// Case-insensitive substring match over name, username and email fields.
    async fn search_by_text(&self, query: &str) -> Result<Vec<UserRecord>, CoreError>;

    /// Resolve several ids, preserving input order and skipping unknown ids.
    ///
    /// The default issues one lookup per id; backends that can batch should
    /// override it.
    async fn resolve_many(&self, ids: &[String]) -> Result<Vec<UserRecord>, CoreError> {
        let mut records = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(record) = self.resolve_by_id(id).await? {
                records.push(record);
            }
        }
        Ok(records)
    }
}

/// Content associated with users (books, in the reference deployment).
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn items_associated_with(&self, user_id: &str) -> Result<Vec<ContentItem>, CoreError>;

    async fn count_associated_with(&self, user_id: &str) -> Result<u64, CoreError>;

    /// Counts for several users at once. Every requested id gets an entry.
    ///
    /// The default issues one count per id; backends that can group should
    /// override it.
    async fn count_associated_with_many(
        &self,
        user_ids: &[String],
    ) -> Result<HashMap<String, u64>, CoreError> {
        let mut counts = HashMap::with_capacity(user_ids.len());
        for id in user_ids {
            counts.insert(id.clone(), self.count_associated_with(id).await?);
        }
        Ok(counts)
    }
}
