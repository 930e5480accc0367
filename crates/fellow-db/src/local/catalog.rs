//! Content catalog over the local `catalog_items` and `user_items` tables.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;

use fellow_core::collaborators::Catalog;
use fellow_core::entities::ContentItem;
use fellow_core::errors::CoreError;
use fellow_core::ids::PREFIX_ITEM;

use crate::FellowDb;
use crate::error::DatabaseError;
use crate::helpers::{MAX_IN_PARAMS, dedupe_ids, get_count, get_opt_string, placeholders, timestamp};

/// Catalog items and their association with users.
#[derive(Clone)]
pub struct LocalCatalog {
    db: FellowDb,
}

impl LocalCatalog {
    #[must_use]
    pub const fn new(db: FellowDb) -> Self {
        Self { db }
    }

    /// Create a catalog item.
    ///
    /// # Errors
    ///
    /// `Validation` for a blank title.
    pub async fn add_item(
        &self,
        title: &str,
        author: Option<&str>,
    ) -> Result<ContentItem, DatabaseError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(CoreError::Validation("item title must not be blank".into()).into());
        }
        let id = self.db.generate_id(PREFIX_ITEM).await?;
        let now = timestamp(Utc::now());
        self.db
            .execute_with(
                "INSERT INTO catalog_items (id, title, author, created_at) VALUES (?1, ?2, ?3, ?4)",
                || libsql::params![id.as_str(), title, author, now.as_str()],
            )
            .await?;
        Ok(ContentItem {
            id,
            title: title.to_string(),
            author: author.map(String::from),
        })
    }

    /// Associate an item with a user. Returns `false` if it already was.
    ///
    /// # Errors
    ///
    /// `NotFound` if the item does not exist.
    pub async fn assign(&self, user_id: &str, item_id: &str) -> Result<bool, DatabaseError> {
        let exists = self
            .db
            .query_row("SELECT 1 FROM catalog_items WHERE id = ?1", || [item_id], |_| Ok(()))
            .await?;
        if exists.is_none() {
            return Err(CoreError::NotFound {
                entity_type: "catalog_item".to_string(),
                id: item_id.to_string(),
            }
            .into());
        }

        let now = timestamp(Utc::now());
        let inserted = self
            .db
            .execute_with(
                "INSERT OR IGNORE INTO user_items (user_id, item_id, added_at) VALUES (?1, ?2, ?3)",
                || [user_id, item_id, now.as_str()],
            )
            .await?;
        Ok(inserted == 1)
    }

    /// Items associated with `user_id`, most recently added first.
    pub async fn items_for(&self, user_id: &str) -> Result<Vec<ContentItem>, DatabaseError> {
        self.db
            .query_map(
                "SELECT c.id, c.title, c.author
                 FROM user_items u JOIN catalog_items c ON c.id = u.item_id
                 WHERE u.user_id = ?1
                 ORDER BY u.added_at DESC, c.title",
                || [user_id],
                |row| {
                    Ok(ContentItem {
                        id: row.get::<String>(0)?,
                        title: row.get::<String>(1)?,
                        author: get_opt_string(row, 2)?,
                    })
                },
            )
            .await
    }

    /// Number of items associated with `user_id`.
    pub async fn count_for(&self, user_id: &str) -> Result<u64, DatabaseError> {
        self.db
            .query_row(
                "SELECT COUNT(*) FROM user_items WHERE user_id = ?1",
                || [user_id],
                |row| get_count(row, 0),
            )
            .await?
            .ok_or(DatabaseError::NoResult)
    }

    /// Grouped counts; every requested id gets an entry.
    pub async fn count_for_many(
        &self,
        user_ids: &[String],
    ) -> Result<HashMap<String, u64>, DatabaseError> {
        let ids = dedupe_ids(user_ids);
        let mut counts: HashMap<String, u64> = ids.iter().map(|id| (id.clone(), 0)).collect();
        for chunk in ids.chunks(MAX_IN_PARAMS) {
            let sql = format!(
                "SELECT user_id, COUNT(*) FROM user_items WHERE user_id IN ({}) GROUP BY user_id",
                placeholders(1, chunk.len())
            );
            let grouped = self
                .db
                .query_map(
                    &sql,
                    || libsql::params_from_iter(chunk.to_vec()),
                    |row| Ok((row.get::<String>(0)?, get_count(row, 1)?)),
                )
                .await?;
            counts.extend(grouped);
        }
        Ok(counts)
    }
}

#[async_trait]
impl Catalog for LocalCatalog {
    async fn items_associated_with(&self, user_id: &str) -> Result<Vec<ContentItem>, CoreError> {
        Ok(self.items_for(user_id).await?)
    }

    async fn count_associated_with(&self, user_id: &str) -> Result<u64, CoreError> {
        Ok(self.count_for(user_id).await?)
    }

    async fn count_associated_with_many(
        &self,
        user_ids: &[String],
    ) -> Result<HashMap<String, u64>, CoreError> {
        Ok(self.count_for_many(user_ids).await?)
    }
}
