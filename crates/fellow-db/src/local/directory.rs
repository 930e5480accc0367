//! Identity directory over the local `users` table.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;

use fellow_core::collaborators::IdentityDirectory;
use fellow_core::entities::UserRecord;
use fellow_core::errors::CoreError;

use crate::FellowDb;
use crate::error::DatabaseError;
use crate::helpers::{MAX_IN_PARAMS, dedupe_ids, placeholders, timestamp};

const USER_COLS: &str = "id, username, first_name, last_name, email";

fn row_to_user(row: &libsql::Row) -> Result<UserRecord, DatabaseError> {
    Ok(UserRecord {
        id: row.get::<String>(0)?,
        username: row.get::<String>(1)?,
        first_name: row.get::<String>(2)?,
        last_name: row.get::<String>(3)?,
        email: row.get::<String>(4)?,
    })
}

/// Text the search pattern is matched against.
///
/// SQLite's `lower()` only folds ASCII, so folding happens here, once, for
/// both sides of the `LIKE`.
fn search_text(user: &UserRecord) -> String {
    [
        user.first_name.as_str(),
        user.last_name.as_str(),
        user.username.as_str(),
        user.email.as_str(),
    ]
    .join("\n")
    .to_lowercase()
}

/// Escape `LIKE` wildcards so user input matches literally.
fn like_pattern(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len() + 2);
    escaped.push('%');
    for c in query.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Users registered in the local database.
#[derive(Clone)]
pub struct LocalDirectory {
    db: FellowDb,
}

impl LocalDirectory {
    #[must_use]
    pub const fn new(db: FellowDb) -> Self {
        Self { db }
    }

    /// Add a user.
    ///
    /// # Errors
    ///
    /// `Validation` for a blank id or username, `LibSql` if the id or
    /// username is already taken.
    pub async fn register(&self, user: &UserRecord) -> Result<UserRecord, DatabaseError> {
        if user.id.trim().is_empty() || user.username.trim().is_empty() {
            return Err(CoreError::Validation("user id and username must not be blank".into()).into());
        }
        let now = timestamp(Utc::now());
        let folded = search_text(user);
        self.db
            .execute_with(
                "INSERT INTO users (id, username, first_name, last_name, email, search_text, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                || {
                    libsql::params![
                        user.id.as_str(),
                        user.username.as_str(),
                        user.first_name.as_str(),
                        user.last_name.as_str(),
                        user.email.as_str(),
                        folded.as_str(),
                        now.as_str()
                    ]
                },
            )
            .await?;
        tracing::info!(
            user_id = %user.id,
            display_name = %user.display_name(),
            "user registered"
        );
        Ok(user.clone())
    }

    /// Look up one user by id.
    pub async fn get(&self, id: &str) -> Result<Option<UserRecord>, DatabaseError> {
        self.db
            .query_row(
                &format!("SELECT {USER_COLS} FROM users WHERE id = ?1"),
                || [id],
                row_to_user,
            )
            .await
    }

    /// Case-insensitive substring search over names, username and email,
    /// ordered by username.
    pub async fn search(&self, query: &str) -> Result<Vec<UserRecord>, DatabaseError> {
        let pattern = like_pattern(query);
        self.db
            .query_map(
                &format!(
                    "SELECT {USER_COLS} FROM users
                     WHERE search_text LIKE ?1 ESCAPE '\\'
                     ORDER BY username"
                ),
                || [pattern.as_str()],
                row_to_user,
            )
            .await
    }

    /// Resolve ids with `IN (...)` lookups, returning them in input order.
    pub async fn get_many(&self, ids: &[String]) -> Result<Vec<UserRecord>, DatabaseError> {
        let mut found: HashMap<String, UserRecord> = HashMap::with_capacity(ids.len());
        for chunk in dedupe_ids(ids).chunks(MAX_IN_PARAMS) {
            let sql = format!(
                "SELECT {USER_COLS} FROM users WHERE id IN ({})",
                placeholders(1, chunk.len())
            );
            let users = self
                .db
                .query_map(&sql, || libsql::params_from_iter(chunk.to_vec()), row_to_user)
                .await?;
            found.extend(users.into_iter().map(|user| (user.id.clone(), user)));
        }
        Ok(ids.iter().filter_map(|id| found.get(id).cloned()).collect())
    }
}

#[async_trait]
impl IdentityDirectory for LocalDirectory {
    async fn resolve_by_id(&self, id: &str) -> Result<Option<UserRecord>, CoreError> {
        Ok(self.get(id).await?)
    }

    async fn search_by_text(&self, query: &str) -> Result<Vec<UserRecord>, CoreError> {
        Ok(self.search(query).await?)
    }

    async fn resolve_many(&self, ids: &[String]) -> Result<Vec<UserRecord>, CoreError> {
        Ok(self.get_many(ids).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::user;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    async fn directory() -> LocalDirectory {
        let db = FellowDb::open_in_memory().await.unwrap();
        let dir = LocalDirectory::new(db);
        for id in ["alice", "bob", "carol"] {
            dir.register(&user(id)).await.unwrap();
        }
        dir.register(&UserRecord {
            id: "dan".into(),
            username: "d_100%".into(),
            first_name: "Dan".into(),
            last_name: "Smith".into(),
            email: "dan@corp.test".into(),
        })
        .await
        .unwrap();
        dir.register(&UserRecord {
            id: "sule".into(),
            username: "sule".into(),
            first_name: "Şule".into(),
            last_name: "Yılmaz".into(),
            email: "sule@corp.test".into(),
        })
        .await
        .unwrap();
        dir.register(&UserRecord {
            id: "emile".into(),
            username: "emile".into(),
            first_name: "Émile".into(),
            last_name: "Zola".into(),
            email: "emile@corp.test".into(),
        })
        .await
        .unwrap();
        dir
    }

    #[rstest]
    #[case::first_name("CAROL", &["carol"])]
    #[case::last_name("reader", &["alice", "bob", "carol"])]
    #[case::email("dan@corp", &["dan"])]
    #[case::non_ascii_exact("Şule", &["sule"])]
    #[case::non_ascii_lowercase("şule", &["sule"])]
    #[case::non_ascii_uppercase("ŞULE", &["sule"])]
    #[case::accented_exact("Émile", &["emile"])]
    #[case::accented_lowercase("émile", &["emile"])]
    #[case::non_ascii_last_name("yılmaz", &["sule"])]
    #[case::fields_do_not_run_together("readeralice", &[])]
    #[case::username_literal_underscore("d_1", &["dan"])]
    #[case::literal_percent("100%", &["dan"])]
    #[case::underscore_is_not_wildcard("a_i", &[])]
    #[tokio::test]
    async fn search_matches_fields(#[case] query: &str, #[case] expected: &[&str]) {
        let dir = directory().await;
        let found: Vec<String> = dir.search(query).await.unwrap().into_iter().map(|u| u.id).collect();
        assert_eq!(found, expected);
    }

    #[tokio::test]
    async fn resolve_many_keeps_order_and_skips_unknown() {
        let dir = directory().await;
        let ids: Vec<String> = ["carol", "ghost", "alice", "carol"]
            .iter()
            .map(|s| (*s).to_string())
            .collect();
        let users = dir.resolve_many(&ids).await.unwrap();
        let got: Vec<_> = users.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(got, vec!["carol", "alice", "carol"]);
    }

    #[tokio::test]
    async fn duplicate_registration_fails() {
        let dir = directory().await;
        assert!(dir.register(&user("alice")).await.is_err());
        assert!(dir.resolve_by_id("alice").await.unwrap().is_some());
        assert!(dir.resolve_by_id("ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn blank_ids_are_rejected() {
        let dir = directory().await;
        let err = dir.register(&user(" ")).await.unwrap_err();
        assert!(matches!(err, DatabaseError::Core(CoreError::Validation(_))));
    }
}
