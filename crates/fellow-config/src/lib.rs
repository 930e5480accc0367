//! # fellow-config
//!
//! Layered configuration loading for Fellow using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`FELLOW_*` prefix, `__` as separator)
//! 2. Project-level `.fellow/config.toml`
//! 3. User-level `~/.config/fellow/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `FELLOW_DATABASE__PATH` -> `database.path`,
//! `FELLOW_RETRY__MAX_ATTEMPTS` -> `retry.max_attempts`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use fellow_config::FellowConfig;
//!
//! let config = FellowConfig::load_with_dotenv().expect("config");
//! println!("database: {}", config.database.path);
//! ```

mod database;
mod error;
mod general;
mod retry;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use retry::RetrySettings;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FellowConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub retry: RetrySettings,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl FellowConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate a configuration from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.retry.validate()?;
        config.general.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests and embedding applications can add providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".fellow/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment = figment.merge(Env::prefixed("FELLOW_").split("__"));

        figment
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("fellow").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_config_loads() {
        let config = FellowConfig::default();
        assert_eq!(config.database.path, ".fellow/fellow.db");
        assert_eq!(config.retry.max_attempts, 4);
        assert_eq!(config.general.default_limit, 20);
    }

    #[test]
    fn project_file_overrides_defaults() {
        Jail::expect_with(|jail| {
            std::fs::create_dir_all(jail.directory().join(".fellow"))
                .map_err(|e| e.to_string())?;
            jail.create_file(
                ".fellow/config.toml",
                r#"
                [database]
                path = "social.db"

                [retry]
                max_attempts = 6
                "#,
            )?;

            let config = FellowConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.database.path, "social.db");
            assert_eq!(config.retry.max_attempts, 6);
            assert_eq!(config.retry.base_delay_ms, 100);
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file() {
        Jail::expect_with(|jail| {
            std::fs::create_dir_all(jail.directory().join(".fellow"))
                .map_err(|e| e.to_string())?;
            jail.create_file(".fellow/config.toml", "[general]\ndefault_limit = 5\n")?;
            jail.set_env("FELLOW_GENERAL__DEFAULT_LIMIT", "50");
            jail.set_env("FELLOW_DATABASE__PATH", ":memory:");

            let config = FellowConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.general.default_limit, 50);
            assert!(config.database.is_in_memory());
            Ok(())
        });
    }

    #[test]
    fn invalid_retry_budget_is_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("FELLOW_RETRY__MAX_ATTEMPTS", "0");
            let result = FellowConfig::load();
            assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
            Ok(())
        });
    }

    #[test]
    fn zero_default_limit_is_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("FELLOW_GENERAL__DEFAULT_LIMIT", "0");
            let err = FellowConfig::load().unwrap_err();
            assert!(err.to_string().contains("general.default_limit"));
            Ok(())
        });
    }
}
