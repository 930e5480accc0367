//! Entity structs for all Fellow domain objects.
//!
//! `Edge` and `EdgeAuditEntry` map to tables owned by `fellow-db`. `UserRecord`
//! and `ContentItem` are what the identity directory and catalog collaborators
//! hand back. All structs derive `Serialize`, `Deserialize`, and `JsonSchema`.

mod audit;
mod content;
mod edge;
mod user;

pub use audit::EdgeAuditEntry;
pub use content::ContentItem;
pub use edge::Edge;
pub use user::UserRecord;
