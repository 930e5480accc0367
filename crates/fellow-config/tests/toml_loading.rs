//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use fellow_config::{ConfigError, FellowConfig};

#[test]
fn loads_all_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[database]
path = "/var/lib/fellow/social.db"

[retry]
max_attempts = 8
base_delay_ms = 25
max_delay_ms = 400

[general]
default_limit = 50
"#,
        )?;

        let figment = Figment::from(Serialized::defaults(FellowConfig::default()))
            .merge(Toml::file("config.toml"));
        let config = FellowConfig::from_figment(&figment).map_err(|e| e.to_string())?;

        assert_eq!(config.database.path, "/var/lib/fellow/social.db");
        assert!(!config.database.is_in_memory());
        assert_eq!(config.retry.max_attempts, 8);
        assert_eq!(config.retry.base_delay_ms, 25);
        assert_eq!(config.retry.max_delay_ms, 400);
        assert_eq!(config.general.default_limit, 50);
        Ok(())
    });
}

#[test]
fn partial_sections_keep_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[retry]\nmax_delay_ms = 500\n")?;

        let figment = Figment::from(Serialized::defaults(FellowConfig::default()))
            .merge(Toml::file("config.toml"));
        let config = FellowConfig::from_figment(&figment).map_err(|e| e.to_string())?;

        assert_eq!(config.retry.max_attempts, 4);
        assert_eq!(config.retry.base_delay_ms, 100);
        assert_eq!(config.retry.max_delay_ms, 500);
        assert_eq!(config.database.path, ".fellow/fellow.db");
        Ok(())
    });
}

#[test]
fn inverted_delays_fail_validation() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            "[retry]\nbase_delay_ms = 900\nmax_delay_ms = 100\n",
        )?;

        let figment = Figment::from(Serialized::defaults(FellowConfig::default()))
            .merge(Toml::file("config.toml"));
        let result = FellowConfig::from_figment(&figment);
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
        Ok(())
    });
}

#[test]
fn wrong_type_is_a_figment_error() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[general]\ndefault_limit = \"many\"\n")?;

        let figment = Figment::from(Serialized::defaults(FellowConfig::default()))
            .merge(Toml::file("config.toml"));
        let result = FellowConfig::from_figment(&figment);
        assert!(matches!(result, Err(ConfigError::Figment(_))));
        Ok(())
    });
}
