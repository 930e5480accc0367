//! Cross-cutting error types for Fellow.
//!
//! `CoreError` carries the per-request outcome taxonomy: a rejected action, an
//! absence, or a backend that stayed busy past its retry budget. Storage
//! errors are defined in `fellow-db` and wrap this type.

use thiserror::Error;

/// Errors that can be raised by any Fellow crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Malformed input, e.g. a self-follow or a blank id.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The actor does not own the edge being mutated.
    #[error("Forbidden: {actor} cannot {action} follow edge {edge_id}")]
    Forbidden {
        actor: String,
        action: String,
        edge_id: String,
    },

    /// The action is not valid for the edge's current status.
    #[error("Invalid state: cannot {action} follow edge {edge_id} while {status}")]
    InvalidState {
        edge_id: String,
        action: String,
        status: String,
    },

    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// A backend stayed busy for every attempt it was allowed. Safe to retry
    /// the whole operation later.
    #[error("Store unavailable after {attempts} attempts: {reason}")]
    Unavailable { attempts: u32, reason: String },

    /// Catch-all for unexpected errors, e.g. a failing collaborator backend.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }

    /// Shorthand for a missing user.
    #[must_use]
    pub fn user_not_found(id: &str) -> Self {
        Self::NotFound {
            entity_type: "user".to_string(),
            id: id.to_string(),
        }
    }

    /// Shorthand for a missing follow edge.
    #[must_use]
    pub fn edge_not_found(id: &str) -> Self {
        Self::NotFound {
            entity_type: "follow_edge".to_string(),
            id: id.to_string(),
        }
    }
}
