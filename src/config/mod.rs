//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `SALES_PREDICTOR` prefix and nested values use double underscores as separators.
//! Every value has a default, so an empty environment is a valid configuration.
//!
//! # Example
//!
//! ```no_run
//! use sales_predictor::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Model at {}", config.artifacts.resolved_model_path().display());
//! ```

mod artifacts;
mod error;
mod logging;

pub use artifacts::ArtifactConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::{LogFormat, LoggingConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    /// Model and dataset locations
    #[serde(default)]
    pub artifacts: ArtifactConfig,

    /// Log level and format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `SALES_PREDICTOR` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `SALES_PREDICTOR__ARTIFACTS__MODEL_PATH=models/v2.json` -> `artifacts.model_path`
    /// - `SALES_PREDICTOR__LOGGING__FORMAT=json` -> `logging.format`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a value cannot be parsed into its expected type.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SALES_PREDICTOR")
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
        self.artifacts.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::path::PathBuf;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("SALES_PREDICTOR__ARTIFACTS__PROJECT_ROOT");
        env::remove_var("SALES_PREDICTOR__ARTIFACTS__MODEL_PATH");
        env::remove_var("SALES_PREDICTOR__LOGGING__LEVEL");
        env::remove_var("SALES_PREDICTOR__LOGGING__FORMAT");
    }

    #[test]
    fn test_load_with_empty_environment_uses_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();

        assert_eq!(config.artifacts, ArtifactConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("SALES_PREDICTOR__ARTIFACTS__PROJECT_ROOT", "/srv/predictor");
        env::set_var("SALES_PREDICTOR__ARTIFACTS__MODEL_PATH", "models/v2.json");
        env::set_var("SALES_PREDICTOR__LOGGING__FORMAT", "json");
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(
            config.artifacts.resolved_model_path(),
            PathBuf::from("/srv/predictor/models/v2.json")
        );
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_validate_reports_bad_log_level() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("SALES_PREDICTOR__LOGGING__LEVEL", "chatty");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::UnknownLogLevel(_))
        ));
    }
}
