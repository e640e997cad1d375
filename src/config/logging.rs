//! Logging configuration

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use super::error::ValidationError;

const LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Output format for log lines
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration
///
/// Logs always go to stderr; stdout carries the conversation.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `warn` or `info,sales_predictor=debug`
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

impl LoggingConfig {
    /// Validate logging configuration
    ///
    /// Every directive must end in a known level.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.level.trim().is_empty() {
            return Err(ValidationError::MissingRequired("logging.level"));
        }
        for directive in self.level.split(',') {
            let level = directive.rsplit('=').next().unwrap_or_default().trim();
            if !LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
                return Err(ValidationError::UnknownLogLevel(directive.trim().to_string()));
            }
        }
        Ok(())
    }

    /// Install the global subscriber. `RUST_LOG` overrides `level`.
    pub fn init_tracing(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));
        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr);

        match self.format {
            LogFormat::Json => builder.json().try_init(),
            LogFormat::Pretty => builder.try_init(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_level() -> String {
    "warn".to_string()
}
