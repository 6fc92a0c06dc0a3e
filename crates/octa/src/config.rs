//! Bot configuration loaded from TOML files and the environment.

use config::{Config, Environment, File, FileFormat};
use derive_getters::Getters;
use octa_error::{ConfigError, OctaResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Bundled defaults, lowest precedence.
const DEFAULT_CONFIG: &str = include_str!("../octa.toml");

/// Environment variable consulted when no token is configured.
pub const TOKEN_FALLBACK_VAR: &str = "DISCORD_TOKEN";

/// Startup settings for an Octa bot.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Getters)]
pub struct OctaConfig {
    /// Bot token; see [`OctaConfig::bot_token`] for the fallback
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
    /// Log and swallow handler failures instead of surfacing them
    catch_errors: bool,
    /// Log the startup banner once per process
    show_banner: bool,
    /// Request every gateway intent, privileged ones included
    privileged_intents: bool,
    /// Log filter used when `RUST_LOG` is unset
    log_level: String,
    /// Emit JSON-formatted logs
    json_logs: bool,
}

impl OctaConfig {
    /// Load configuration with precedence: environment > ./octa.toml > bundled defaults.
    ///
    /// A `.env` file in the working directory is read first, if present.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use octa::OctaConfig;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = OctaConfig::load()?;
    /// let token = config.bot_token()?;
    /// # Ok(())
    /// # }
    /// ```
    #[instrument]
    pub fn load() -> OctaResult<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "Loaded .env");
        }

        let builder = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::with_name("octa").required(false))
            .add_source(Environment::with_prefix("OCTA").try_parsing(true));

        Self::finish(builder)
    }

    /// Load configuration from a specific file, layered over the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> OctaResult<Self> {
        let builder = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path.as_ref()));

        Self::finish(builder)
    }

    /// Parse TOML text layered over the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or has mistyped keys.
    pub fn from_toml_str(toml: &str) -> OctaResult<Self> {
        let builder = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from_str(toml, FileFormat::Toml));

        Self::finish(builder)
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> OctaResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;

        debug!(
            has_token = config.token.is_some(),
            catch_errors = config.catch_errors,
            privileged_intents = config.privileged_intents,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Set the bot token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the failure policy.
    pub fn with_catch_errors(mut self, catch: bool) -> Self {
        self.catch_errors = catch;
        self
    }

    /// Enable or suppress the startup banner.
    pub fn with_banner(mut self, show: bool) -> Self {
        self.show_banner = show;
        self
    }

    /// Bot token, falling back to `DISCORD_TOKEN`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when neither source yields a non-blank token.
    pub fn bot_token(&self) -> OctaResult<String> {
        Ok(self.resolve_token(std::env::var(TOKEN_FALLBACK_VAR).ok())?)
    }

    /// Bot token, falling back to `fallback`.
    pub fn resolve_token(&self, fallback: Option<String>) -> Result<String, ConfigError> {
        self.token
            .iter()
            .cloned()
            .chain(fallback)
            .find(|token| !token.trim().is_empty())
            .ok_or_else(|| {
                ConfigError::for_key(
                    "token",
                    format!(
                        "Missing bot token: set `token`, OCTA_TOKEN or {}",
                        TOKEN_FALLBACK_VAR
                    ),
                )
            })
    }
}

impl Default for OctaConfig {
    fn default() -> Self {
        Self {
            token: None,
            catch_errors: false,
            show_banner: true,
            privileged_intents: true,
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}
