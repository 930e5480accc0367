//! Composed results returned by the service layer.
//!
//! These structs define the JSON shape handed to transports (the `fellow`
//! CLI prints them as-is).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{ContentItem, Edge, UserRecord};
use crate::enums::{FollowChange, FollowStatus};

/// Relationship numbers for one subject, as seen by one viewer.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SubjectStats {
    pub followers_count: u64,
    pub following_count: u64,
    pub content_count: u64,
    pub is_following: bool,
}

/// Result of `follow`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FollowOutcome {
    pub edge: Edge,
    pub change: FollowChange,
}

/// A pending request joined with the requesting user.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PendingRequest {
    pub edge: Edge,
    pub follower: UserRecord,
}

/// A single user profile as seen by a viewer.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ProfileView {
    pub user: UserRecord,
    pub followers_count: u64,
    pub following_count: u64,
    pub is_following: bool,
    pub is_current_user: bool,
    /// Status of the viewer → subject edge, if one exists.
    pub relation: Option<FollowStatus>,
    /// Catalog count for the subject, the same figure search results carry.
    pub content_count: u64,
    pub items: Vec<ContentItem>,
}

/// One row of a user search.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct UserSearchResult {
    pub id: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub followers_count: u64,
    pub following_count: u64,
    pub content_count: u64,
    pub is_following: bool,
    pub is_current_user: bool,
}

impl UserSearchResult {
    #[must_use]
    pub fn new(user: UserRecord, stats: SubjectStats, is_current_user: bool) -> Self {
        Self {
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            followers_count: stats.followers_count,
            following_count: stats.following_count,
            content_count: stats.content_count,
            is_following: stats.is_following,
            is_current_user,
        }
    }
}

/// Result of `search`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SearchView {
    pub query: String,
    pub users: Vec<UserSearchResult>,
}

impl SearchView {
    #[must_use]
    pub fn empty(query: &str) -> Self {
        Self {
            query: query.to_string(),
            users: Vec::new(),
        }
    }

    #[must_use]
    pub fn has_results(&self) -> bool {
        !self.users.is_empty()
    }
}
