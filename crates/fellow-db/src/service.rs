//! Service layer wiring the relationship store to its collaborators.
//!
//! `FellowService` wraps `FellowDb` (the relationship store) together with the
//! identity directory and the content catalog. All operations are implemented
//! as `impl FellowService` blocks in `repos/`.

use std::sync::Arc;

use fellow_core::collaborators::{Catalog, IdentityDirectory};

use crate::FellowDb;
use crate::error::DatabaseError;
use crate::local::{LocalCatalog, LocalDirectory};
use crate::retry::RetryConfig;

/// Orchestrates follow mutations, aggregation and profile/search composition.
///
/// Every mutation follows this protocol:
/// 1. Read the pair or edge and lift it into an `EdgeState`
/// 2. Ask the state machine for a plan
/// 3. Apply the plan with a single conditional statement
/// 4. On a lost race, re-read and re-plan within the retry budget
/// 5. Append an edge audit entry
#[derive(Clone)]
pub struct FellowService {
    db: FellowDb,
    directory: Arc<dyn IdentityDirectory>,
    catalog: Arc<dyn Catalog>,
}

impl FellowService {
    /// Create a service over a local database using the bundled directory
    /// and catalog adapters.
    ///
    /// # Arguments
    ///
    /// * `db_path`: Path to the libSQL database file, or `":memory:"` for tests.
    /// * `retry`: Budget for transient errors and conflict re-reads.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str, retry: RetryConfig) -> Result<Self, DatabaseError> {
        let db = FellowDb::open_local(db_path, retry).await?;
        Ok(Self::from_db(db))
    }

    /// Create from an existing `FellowDb` with the bundled adapters.
    #[must_use]
    pub fn from_db(db: FellowDb) -> Self {
        let directory = Arc::new(LocalDirectory::new(db.clone()));
        let catalog = Arc::new(LocalCatalog::new(db.clone()));
        Self::from_parts(db, directory, catalog)
    }

    /// Create with caller-supplied collaborators.
    #[must_use]
    pub fn from_parts(
        db: FellowDb,
        directory: Arc<dyn IdentityDirectory>,
        catalog: Arc<dyn Catalog>,
    ) -> Self {
        Self {
            db,
            directory,
            catalog,
        }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &FellowDb {
        &self.db
    }

    /// Access the identity directory.
    #[must_use]
    pub fn directory(&self) -> &dyn IdentityDirectory {
        self.directory.as_ref()
    }

    /// Access the content catalog.
    #[must_use]
    pub fn catalog(&self) -> &dyn Catalog {
        self.catalog.as_ref()
    }
}
