//! Database error types for fellow-db.

use fellow_core::errors::CoreError;
use thiserror::Error;

/// Errors from store operations and the service layer built on them.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed or returned malformed data.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Conflicts or transient errors outlasted the retry budget.
    #[error("Store unavailable after {attempts} attempts: {reason}")]
    Unavailable { attempts: u32, reason: String },

    /// A rejected action or absence from the domain layer.
    #[error(transparent)]
    Core(CoreError),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Core(CoreError::NotFound { .. }))
    }

    #[must_use]
    pub const fn is_forbidden(&self) -> bool {
        matches!(self, Self::Core(CoreError::Forbidden { .. }))
    }

    #[must_use]
    pub const fn is_invalid_state(&self) -> bool {
        matches!(self, Self::Core(CoreError::InvalidState { .. }))
    }

    #[must_use]
    pub const fn is_invalid_request(&self) -> bool {
        matches!(self, Self::Core(CoreError::InvalidRequest(_)))
    }

    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(
            self,
            Self::Unavailable { .. } | Self::Core(CoreError::Unavailable { .. })
        )
    }
}

/// A busy collaborator surfaces as this crate's own `Unavailable`.
impl From<CoreError> for DatabaseError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Unavailable { attempts, reason } => Self::Unavailable { attempts, reason },
            core => Self::Core(core),
        }
    }
}

/// Collaborator adapters backed by this crate report through `CoreError`.
impl From<DatabaseError> for CoreError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::Core(core) => core,
            DatabaseError::Unavailable { attempts, reason } => Self::Unavailable { attempts, reason },
            other => Self::Other(anyhow::Error::new(other)),
        }
    }
}
