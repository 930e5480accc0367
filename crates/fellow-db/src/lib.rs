//! # fellow-db
//!
//! libSQL storage and service layer for Fellow.
//!
//! Holds the follow edges and their audit trail, runs the state machine from
//! `fellow-core` against them, aggregates counts for profiles and search, and
//! ships local adapters for the identity directory and the content catalog.
//!
//! Uses the `libsql` crate (C `SQLite` fork, v0.9.29) in local mode.

pub mod error;
pub mod helpers;
pub mod local;
mod migrations;
pub mod repos;
pub mod retry;
pub mod service;

#[cfg(test)]
mod test_support;

use std::sync::Arc;
use std::time::Duration;

use libsql::Builder;
use libsql::params::IntoParams;

use error::DatabaseError;
use retry::{RetryConfig, is_transient_error};

/// Central database handle for Fellow state.
///
/// Cloning is cheap and clones share the same connection, so an in-memory
/// database stays visible to every clone.
#[derive(Clone)]
pub struct FellowDb {
    #[allow(dead_code)]
    db: Arc<libsql::Database>,
    conn: libsql::Connection,
    retry: RetryConfig,
}

impl FellowDb {
    /// Open a local database at the given path, or `":memory:"`.
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str, retry: RetryConfig) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let fellow_db = Self {
            db: Arc::new(db),
            conn,
            retry,
        };
        fellow_db.run_migrations().await?;
        Ok(fellow_db)
    }

    /// Open a fresh in-memory database with default retry settings.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if migrations fail.
    pub async fn open_in_memory() -> Result<Self, DatabaseError> {
        Self::open_local(":memory:", RetryConfig::default()).await
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Retry budget shared by transient-error retries and conflict re-reads.
    #[must_use]
    pub const fn retry(&self) -> &RetryConfig {
        &self.retry
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"flw-a3f8b2c1"`.
    ///
    /// Uses `randomblob(4)` in SQL to produce 8-char hex, then prepends the prefix.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        self.query_row(
            &format!("SELECT '{prefix}-' || lower(hex(randomblob(4)))"),
            || (),
            |row| Ok(row.get::<String>(0)?),
        )
        .await?
        .ok_or(DatabaseError::NoResult)
    }

    /// Execute a statement, retrying transient lock errors with backoff.
    ///
    /// `params` is a factory because libSQL consumes parameters on each call.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Unavailable` once the retry budget is spent on
    /// transient errors, or the first non-transient error as-is.
    pub async fn execute_with<F, P>(&self, sql: &str, params: F) -> Result<u64, DatabaseError>
    where
        F: Fn() -> P,
        P: IntoParams,
    {
        let mut delay = self.retry.base_delay;
        let mut attempt = 1;
        loop {
            match self.conn.execute(sql, params()).await {
                Ok(affected) => return Ok(affected),
                Err(e) => delay = self.backoff(e, attempt, delay).await?,
            }
            attempt += 1;
        }
    }

    /// Run a query and map every row, retrying transient lock errors with
    /// backoff.
    ///
    /// libSQL reports `SQLITE_BUSY` while stepping, not when the statement is
    /// prepared, so rows are stepped and mapped inside the retry loop. This
    /// also covers `INSERT/UPDATE/DELETE ... RETURNING` writes.
    ///
    /// # Errors
    ///
    /// Same as [`Self::execute_with`], plus whatever `map` returns.
    pub async fn query_map<T, F, P, M>(
        &self,
        sql: &str,
        params: F,
        map: M,
    ) -> Result<Vec<T>, DatabaseError>
    where
        F: Fn() -> P,
        P: IntoParams,
        M: Fn(&libsql::Row) -> Result<T, DatabaseError>,
    {
        let mut delay = self.retry.base_delay;
        let mut attempt = 1;
        loop {
            match self.step_all(sql, params(), &map).await {
                Ok(mapped) => return Ok(mapped),
                Err(DatabaseError::LibSql(e)) => delay = self.backoff(e, attempt, delay).await?,
                Err(other) => return Err(other),
            }
            attempt += 1;
        }
    }

    /// [`Self::query_map`] for statements yielding at most one row of interest.
    ///
    /// # Errors
    ///
    /// Same as [`Self::query_map`].
    pub async fn query_row<T, F, P, M>(
        &self,
        sql: &str,
        params: F,
        map: M,
    ) -> Result<Option<T>, DatabaseError>
    where
        F: Fn() -> P,
        P: IntoParams,
        M: Fn(&libsql::Row) -> Result<T, DatabaseError>,
    {
        Ok(self.query_map(sql, params, map).await?.into_iter().next())
    }

    async fn step_all<T, P, M>(
        &self,
        sql: &str,
        params: P,
        map: &M,
    ) -> Result<Vec<T>, DatabaseError>
    where
        P: IntoParams,
        M: Fn(&libsql::Row) -> Result<T, DatabaseError>,
    {
        let mut rows = self.conn.query(sql, params).await?;
        let mut mapped = Vec::new();
        while let Some(row) = rows.next().await? {
            mapped.push(map(&row)?);
        }
        Ok(mapped)
    }

    /// Sleep before the next attempt, or give up with the mapped error.
    async fn backoff(
        &self,
        error: libsql::Error,
        attempt: u32,
        delay: Duration,
    ) -> Result<Duration, DatabaseError> {
        if !is_transient_error(&error) {
            return Err(error.into());
        }
        if attempt >= self.retry.max_attempts {
            return Err(DatabaseError::Unavailable {
                attempts: attempt,
                reason: error.to_string(),
            });
        }
        tracing::warn!(attempt, ?delay, %error, "transient store error, retrying");
        tokio::time::sleep(delay).await;
        Ok(self.retry.next_delay(delay))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    async fn test_db() -> FellowDb {
        FellowDb::open_in_memory().await.unwrap()
    }

    async fn table_exists(db: &FellowDb, name: &str) -> bool {
        let mut rows = db
            .conn()
            .query(
                "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                [name],
            )
            .await
            .unwrap();
        rows.next().await.unwrap().is_some()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;
        for table in ["user_follows", "edge_audit", "users", "catalog_items", "user_items"] {
            assert!(table_exists(&db, table).await, "table '{table}' should exist");
        }
    }

    #[tokio::test]
    async fn generate_id_correct_format() {
        let db = test_db().await;
        let id = db.generate_id("flw").await.unwrap();
        assert!(id.starts_with("flw-"), "ID should start with 'flw-': {id}");
        assert_eq!(id.len(), 12, "ID should be 12 chars: {id}");
        assert!(id[4..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn generate_id_all_prefixes() {
        let db = test_db().await;
        for prefix in fellow_core::ids::ALL_PREFIXES {
            let id = db.generate_id(prefix).await.unwrap();
            assert!(fellow_core::ids::has_prefix(&id, prefix));
        }
    }

    #[tokio::test]
    async fn generate_id_uniqueness() {
        let db = test_db().await;
        let mut ids = HashSet::new();
        for _ in 0..100 {
            let id = db.generate_id("tst").await.unwrap();
            assert!(ids.insert(id.clone()), "Duplicate ID generated: {id}");
        }
    }

    #[tokio::test]
    async fn idempotent_migrations() {
        let db = test_db().await;
        db.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn pair_unique_constraint() {
        let db = test_db().await;
        let insert = "INSERT INTO user_follows (id, follower_id, following_id, status, created_at, requested_at, updated_at)
                      VALUES (?1, 'alice', 'bob', 'pending', 't', 't', 't')";
        db.conn().execute(insert, ["flw-1"]).await.unwrap();
        let result = db.conn().execute(insert, ["flw-2"]).await;
        assert!(result.is_err(), "duplicate pair should be rejected");

        // The reverse direction is an independent edge.
        db.conn()
            .execute(
                "INSERT INTO user_follows (id, follower_id, following_id, status, created_at, requested_at, updated_at)
                 VALUES ('flw-3', 'bob', 'alice', 'pending', 't', 't', 't')",
                (),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn self_edge_check_constraint() {
        let db = test_db().await;
        let result = db
            .conn()
            .execute(
                "INSERT INTO user_follows (id, follower_id, following_id, status, created_at, requested_at, updated_at)
                 VALUES ('flw-1', 'alice', 'alice', 'pending', 't', 't', 't')",
                (),
            )
            .await;
        assert!(result.is_err(), "self-edge should be rejected by the store");
    }

    #[tokio::test]
    async fn unknown_status_rejected() {
        let db = test_db().await;
        let result = db
            .conn()
            .execute(
                "INSERT INTO user_follows (id, follower_id, following_id, status, created_at, requested_at, updated_at)
                 VALUES ('flw-1', 'alice', 'bob', 'blocked', 't', 't', 't')",
                (),
            )
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn non_transient_errors_are_not_retried() {
        let db = test_db().await;
        let result = db.execute_with("INSERT INTO no_such_table VALUES (1)", || ()).await;
        assert!(matches!(result, Err(DatabaseError::LibSql(_))));
    }

    #[tokio::test]
    async fn on_disk_database_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fellow.db");
        let path = path.to_str().unwrap();
        {
            let db = FellowDb::open_local(path, RetryConfig::default()).await.unwrap();
            db.execute_with(
                "INSERT INTO users (id, username, first_name, last_name, email, created_at)
                 VALUES ('u1', 'ada', 'Ada', 'Lovelace', 'ada@example.com', 't')",
                || (),
            )
            .await
            .unwrap();
        }
        let db = FellowDb::open_local(path, RetryConfig::default()).await.unwrap();
        let mut rows = db.conn().query("SELECT count(*) FROM users", ()).await.unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<i64>(0).unwrap(), 1);
    }
}
