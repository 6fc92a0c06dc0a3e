//! Tracing subscriber setup.

use crate::OctaConfig;
use octa_error::{ConfigError, OctaResult};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Settings for the global tracing subscriber.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "octa_core=debug")
    pub log_level: String,
    /// Enable JSON-formatted logs for structured logging
    pub json_logs: bool,
}

impl LoggingConfig {
    /// Create a configuration with the given filter.
    pub fn new(log_level: impl Into<String>) -> Self {
        Self {
            log_level: log_level.into(),
            json_logs: false,
        }
    }

    /// Enable JSON-formatted logs.
    pub fn with_json_logs(mut self, enabled: bool) -> Self {
        self.json_logs = enabled;
        self
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::new("info")
    }
}

impl From<&OctaConfig> for LoggingConfig {
    fn from(config: &OctaConfig) -> Self {
        Self::new(config.log_level().clone()).with_json_logs(*config.json_logs())
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins over the configured level when set.
///
/// # Errors
///
/// Returns a [`ConfigError`] when the filter does not parse or a global
/// subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> OctaResult<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| {
            ConfigError::for_key(
                "log_level",
                format!("invalid filter '{}': {}", config.log_level, e),
            )
        })?;

    let fmt_layer = if config.json_logs {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_level(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_level(true)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| ConfigError::new(format!("Failed to install subscriber: {}", e)))?;

    Ok(())
}
