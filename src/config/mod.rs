//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `HELP_ME_DECIDE`
//! prefix and nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use help_me_decide::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Default strategy: {}", config.engine.strategy());
//! ```

mod catalog;
mod engine;
mod error;
mod logging;

pub use catalog::CatalogConfig;
pub use engine::EngineConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a usable
/// configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Decision engine settings (strategy, limits, validators)
    #[serde(default)]
    pub engine: EngineConfig,

    /// Catalog file for the command-line driver
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Tracing output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `HELP_ME_DECIDE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `HELP_ME_DECIDE__ENGINE__DEFAULT_STRATEGY=random_question`
    /// - `HELP_ME_DECIDE__CATALOG__PATH=pizzas.yaml`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("HELP_ME_DECIDE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.engine.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::questions::Strategy;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("HELP_ME_DECIDE__ENGINE__DEFAULT_STRATEGY");
        env::remove_var("HELP_ME_DECIDE__ENGINE__MAX_CATALOG_ITEMS");
        env::remove_var("HELP_ME_DECIDE__ENGINE__REQUIRE_UNIFORM_FEATURES");
        env::remove_var("HELP_ME_DECIDE__ENGINE__RANDOM_SEED");
        env::remove_var("HELP_ME_DECIDE__CATALOG__PATH");
        env::remove_var("HELP_ME_DECIDE__LOGGING__JSON");
    }

    #[test]
    fn test_load_defaults_from_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.engine.strategy(), Strategy::FirstQuestion);
        assert_eq!(config.engine.max_catalog_items, 5000);
        assert!(config.catalog.path().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_engine_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("HELP_ME_DECIDE__ENGINE__DEFAULT_STRATEGY", "random_question");
        env::set_var("HELP_ME_DECIDE__ENGINE__MAX_CATALOG_ITEMS", "10");
        env::set_var("HELP_ME_DECIDE__ENGINE__REQUIRE_UNIFORM_FEATURES", "true");
        env::set_var("HELP_ME_DECIDE__ENGINE__RANDOM_SEED", "42");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.engine.strategy(), Strategy::RandomQuestion);
        assert_eq!(config.engine.max_catalog_items, 10);
        assert!(config.engine.require_uniform_features);
        assert_eq!(config.engine.random_seed, Some(42));
    }

    #[test]
    fn test_load_catalog_path() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("HELP_ME_DECIDE__CATALOG__PATH", "pizzas.yaml");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.catalog.extension(), Some("yaml"));
    }

    #[test]
    fn test_validate_rejects_unknown_strategy() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("HELP_ME_DECIDE__ENGINE__DEFAULT_STRATEGY", "coin_flip");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.validate().is_err());
    }
}
