//! Edge audit repository.
//!
//! Append-only entries recording every edge mutation. Rows outlive the edge
//! they describe, so the history of a removed edge stays queryable.

use chrono::Utc;
use serde::Serialize;

use fellow_core::entities::EdgeAuditEntry;
use fellow_core::enums::EdgeAction;
use fellow_core::ids::PREFIX_AUDIT;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime, parse_enum, parse_optional_json, timestamp};
use crate::service::FellowService;

/// Filter criteria for audit queries.
#[derive(Debug, Default)]
pub struct AuditFilter {
    pub edge_id: Option<String>,
    pub actor_id: Option<String>,
    pub action: Option<EdgeAction>,
    pub limit: Option<u32>,
}

fn row_to_entry(row: &libsql::Row) -> Result<EdgeAuditEntry, DatabaseError> {
    Ok(EdgeAuditEntry {
        id: row.get::<String>(0)?,
        edge_id: row.get::<String>(1)?,
        actor_id: row.get::<String>(2)?,
        action: parse_enum(&row.get::<String>(3)?)?,
        detail: parse_optional_json(get_opt_string(row, 4)?.as_deref())?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

impl FellowService {
    /// Append an audit entry.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the INSERT fails.
    pub async fn append_audit(&self, entry: &EdgeAuditEntry) -> Result<(), DatabaseError> {
        let detail = entry.detail.as_ref().map(ToString::to_string);
        self.db()
            .execute_with(
                "INSERT INTO edge_audit (id, edge_id, actor_id, action, detail, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                || {
                    libsql::params![
                        entry.id.as_str(),
                        entry.edge_id.as_str(),
                        entry.actor_id.as_str(),
                        entry.action.as_str(),
                        detail.as_deref(),
                        timestamp(entry.created_at)
                    ]
                },
            )
            .await?;
        Ok(())
    }

    /// Record a mutation that has already been applied.
    ///
    /// The edge change is the outcome the caller observes, so a failed audit
    /// write is logged and swallowed.
    pub(crate) async fn record_audit<D: Serialize + Sync>(
        &self,
        edge_id: &str,
        actor_id: &str,
        action: EdgeAction,
        detail: &D,
    ) {
        if let Err(error) = self.try_record_audit(edge_id, actor_id, action, detail).await {
            tracing::warn!(edge_id, actor_id, action = action.as_str(), %error, "failed to append edge audit entry");
        }
    }

    async fn try_record_audit<D: Serialize + Sync>(
        &self,
        edge_id: &str,
        actor_id: &str,
        action: EdgeAction,
        detail: &D,
    ) -> Result<(), DatabaseError> {
        let detail = serde_json::to_value(detail).map_err(|e| DatabaseError::Other(e.into()))?;
        let id = self.db().generate_id(PREFIX_AUDIT).await?;
        self.append_audit(&EdgeAuditEntry {
            id,
            edge_id: edge_id.to_string(),
            actor_id: actor_id.to_string(),
            action,
            detail: Some(detail),
            created_at: Utc::now(),
        })
        .await
    }

    /// Query audit entries with optional filters, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn query_audit(
        &self,
        filter: &AuditFilter,
    ) -> Result<Vec<EdgeAuditEntry>, DatabaseError> {
        let mut conditions = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(ref edge_id) = filter.edge_id {
            params.push(libsql::Value::Text(edge_id.clone()));
            conditions.push(format!("edge_id = ?{}", params.len()));
        }
        if let Some(ref actor_id) = filter.actor_id {
            params.push(libsql::Value::Text(actor_id.clone()));
            conditions.push(format!("actor_id = ?{}", params.len()));
        }
        if let Some(action) = filter.action {
            params.push(libsql::Value::Text(action.as_str().to_string()));
            conditions.push(format!("action = ?{}", params.len()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let limit = filter.limit.unwrap_or(100);
        let sql = format!(
            "SELECT id, edge_id, actor_id, action, detail, created_at
             FROM edge_audit {where_clause}
             ORDER BY created_at DESC, rowid DESC LIMIT {limit}"
        );

        self.db()
            .query_map(&sql, || libsql::params_from_iter(params.clone()), row_to_entry)
            .await
    }

    /// Full history of one edge, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn edge_history(&self, edge_id: &str) -> Result<Vec<EdgeAuditEntry>, DatabaseError> {
        self.db()
            .query_map(
                "SELECT id, edge_id, actor_id, action, detail, created_at
                 FROM edge_audit WHERE edge_id = ?1
                 ORDER BY created_at, rowid",
                || [edge_id],
                row_to_entry,
            )
            .await
    }
}
