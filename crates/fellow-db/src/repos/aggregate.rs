//! Aggregation engine: follower/following counts and is-following flags.
//!
//! Only accepted edges count. The single-subject methods are the baseline;
//! [`FellowService::subject_stats_batch`] must agree with them for every
//! subject while issuing a fixed number of grouped queries per chunk of ids.

use std::collections::{HashMap, HashSet};

use fellow_core::views::SubjectStats;

use crate::error::DatabaseError;
use crate::helpers::{MAX_IN_PARAMS, dedupe_ids, get_count, placeholders};
use crate::service::FellowService;

impl FellowService {
    /// Number of accepted followers of `user_id`.
    pub async fn followers_count(&self, user_id: &str) -> Result<u64, DatabaseError> {
        self.count_accepted("following_id", user_id).await
    }

    /// Number of accepted edges leaving `user_id`.
    pub async fn following_count(&self, user_id: &str) -> Result<u64, DatabaseError> {
        self.count_accepted("follower_id", user_id).await
    }

    /// `(followers_count, following_count)` for one user.
    pub async fn follow_counts(&self, user_id: &str) -> Result<(u64, u64), DatabaseError> {
        Ok((
            self.followers_count(user_id).await?,
            self.following_count(user_id).await?,
        ))
    }

    /// Whether an accepted edge `viewer_id -> subject_id` exists.
    pub async fn is_following(
        &self,
        viewer_id: &str,
        subject_id: &str,
    ) -> Result<bool, DatabaseError> {
        Ok(self.edge_state(viewer_id, subject_id).await?.is_following())
    }

    /// Stats for one subject, one query per figure.
    pub async fn subject_stats(
        &self,
        viewer_id: &str,
        subject_id: &str,
    ) -> Result<SubjectStats, DatabaseError> {
        let (followers_count, following_count) = self.follow_counts(subject_id).await?;
        Ok(SubjectStats {
            followers_count,
            following_count,
            content_count: self.catalog().count_associated_with(subject_id).await?,
            is_following: self.is_following(viewer_id, subject_id).await?,
        })
    }

    /// Stats for many subjects at once.
    ///
    /// Duplicate ids collapse to one entry; subjects without edges report
    /// zeros.
    pub async fn subject_stats_batch(
        &self,
        viewer_id: &str,
        subject_ids: &[String],
    ) -> Result<HashMap<String, SubjectStats>, DatabaseError> {
        let ids = dedupe_ids(subject_ids);
        let mut stats: HashMap<String, SubjectStats> = ids
            .iter()
            .map(|id| (id.clone(), SubjectStats::default()))
            .collect();
        if ids.is_empty() {
            return Ok(stats);
        }

        for chunk in ids.chunks(MAX_IN_PARAMS) {
            let followers = self
                .grouped_accepted_counts("following_id", chunk)
                .await?;
            let following = self.grouped_accepted_counts("follower_id", chunk).await?;
            let followed = self.accepted_targets_among(viewer_id, chunk).await?;

            for id in chunk {
                if let Some(entry) = stats.get_mut(id) {
                    entry.followers_count = followers.get(id).copied().unwrap_or(0);
                    entry.following_count = following.get(id).copied().unwrap_or(0);
                    entry.is_following = followed.contains(id);
                }
            }
        }

        let content = self.catalog().count_associated_with_many(&ids).await?;
        for (id, entry) in &mut stats {
            entry.content_count = content.get(id).copied().unwrap_or(0);
        }

        tracing::debug!(viewer_id, subjects = ids.len(), "aggregated subject stats");
        Ok(stats)
    }

    async fn count_accepted(&self, column: &'static str, user_id: &str) -> Result<u64, DatabaseError> {
        self.db()
            .query_row(
                &format!(
                    "SELECT COUNT(*) FROM user_follows WHERE {column} = ?1 AND status = 'accepted'"
                ),
                || [user_id],
                |row| get_count(row, 0),
            )
            .await?
            .ok_or(DatabaseError::NoResult)
    }

    /// `GROUP BY column` counts of accepted edges for the ids in `chunk`.
    async fn grouped_accepted_counts(
        &self,
        column: &'static str,
        chunk: &[String],
    ) -> Result<HashMap<String, u64>, DatabaseError> {
        let sql = format!(
            "SELECT {column}, COUNT(*) FROM user_follows
             WHERE status = 'accepted' AND {column} IN ({})
             GROUP BY {column}",
            placeholders(1, chunk.len())
        );
        let pairs = self
            .db()
            .query_map(
                &sql,
                || libsql::params_from_iter(chunk.to_vec()),
                |row| Ok((row.get::<String>(0)?, get_count(row, 1)?)),
            )
            .await?;
        Ok(pairs.into_iter().collect())
    }

    /// Which ids in `chunk` the viewer follows with an accepted edge.
    async fn accepted_targets_among(
        &self,
        viewer_id: &str,
        chunk: &[String],
    ) -> Result<HashSet<String>, DatabaseError> {
        let sql = format!(
            "SELECT following_id FROM user_follows
             WHERE follower_id = ?1 AND status = 'accepted' AND following_id IN ({})",
            placeholders(2, chunk.len())
        );
        let followed = self
            .db()
            .query_map(
                &sql,
                || {
                    let mut params = Vec::with_capacity(chunk.len() + 1);
                    params.push(viewer_id.to_string());
                    params.extend(chunk.iter().cloned());
                    libsql::params_from_iter(params)
                },
                |row| Ok(row.get::<String>(0)?),
            )
            .await?;
        Ok(followed.into_iter().collect())
    }
}
