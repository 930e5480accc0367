//! Typed audit detail payloads.
//!
//! Each edge audit action carries a structured `detail` JSON blob.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Detail for `EdgeAction::Accepted`, `EdgeAction::Rejected` and
/// `EdgeAction::Rerequested`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StatusChangedDetail {
    pub from: String,
    pub to: String,
}

/// Detail for `EdgeAction::Created` and `EdgeAction::Removed`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PairDetail {
    pub follower_id: String,
    pub following_id: String,
    /// Status of the edge at the time of the action.
    pub status: String,
}
