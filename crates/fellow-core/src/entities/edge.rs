use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::FollowStatus;

/// A directed follow relationship between two identities.
///
/// At most one edge exists per ordered `(follower_id, following_id)` pair.
/// `created_at` never changes after creation; `requested_at` moves forward
/// when a rejected edge is requested again.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Edge {
    pub id: String,
    pub follower_id: String,
    pub following_id: String,
    pub status: FollowStatus,
    pub created_at: DateTime<Utc>,
    pub requested_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Edge {
    /// Whether this edge makes `follower_id` a follower of `following_id`.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        self.status == FollowStatus::Accepted
    }

    /// Whether `user_id` is the target of this edge, the only party allowed
    /// to accept or reject it.
    #[must_use]
    pub fn is_target(&self, user_id: &str) -> bool {
        self.following_id == user_id
    }
}
