use anyhow::Context;
use fellow_config::FellowConfig;

use crate::cli::GlobalFlags;

/// Load layered configuration, then apply command-line overrides.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<FellowConfig> {
    let mut config = FellowConfig::load_with_dotenv().context("failed to load fellow config")?;
    apply_overrides(&mut config, flags);
    Ok(config)
}

fn apply_overrides(config: &mut FellowConfig, flags: &GlobalFlags) {
    if let Some(path) = &flags.db {
        tracing::debug!(path = %path, "database path overridden on the command line");
        config.database.path.clone_from(path);
    }
}
