use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An opaque catalog item (a book, in the reference deployment) associated
/// with a user.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ContentItem {
    pub id: String,
    pub title: String,
    pub author: Option<String>,
}
