use std::sync::Arc;

use anyhow::Context;
use fellow_config::FellowConfig;
use fellow_db::FellowDb;
use fellow_db::local::{LocalCatalog, LocalDirectory};
use fellow_db::retry::RetryConfig;
use fellow_db::service::FellowService;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: FellowService,
    pub directory: LocalDirectory,
    pub catalog: LocalCatalog,
    pub config: FellowConfig,
}

impl AppContext {
    /// Open the configured database and wire the local adapters into the service.
    pub async fn init(config: FellowConfig) -> anyhow::Result<Self> {
        if let Some(parent) = config.database.parent_dir() {
            std::fs::create_dir_all(&parent).with_context(|| {
                format!("failed to create database directory {}", parent.display())
            })?;
        }

        let retry = RetryConfig::from(&config.retry);
        let db = FellowDb::open_local(&config.database.path, retry)
            .await
            .with_context(|| format!("failed to open database at {}", config.database.path))?;

        let directory = LocalDirectory::new(db.clone());
        let catalog = LocalCatalog::new(db.clone());
        let service = FellowService::from_parts(
            db,
            Arc::new(directory.clone()),
            Arc::new(catalog.clone()),
        );

        Ok(Self {
            service,
            directory,
            catalog,
            config,
        })
    }
}
