use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::EdgeAction;

/// An append-only audit entry recording a mutation of a follow edge.
///
/// `actor_id` is the identity that triggered the mutation: the follower for
/// create, re-request and removal; the target for accept and reject.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct EdgeAuditEntry {
    pub id: String,
    pub edge_id: String,
    pub actor_id: String,
    pub action: EdgeAction,
    pub detail: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}
