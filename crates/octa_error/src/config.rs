//! Configuration error types.

use std::fmt;

/// Bad or missing setting, with the location that reported it.
///
/// `key` names the offending setting when one is to blame; errors raised by
/// the configuration loader as a whole leave it empty.
#[derive(Debug, Clone, derive_more::Error)]
pub struct ConfigError {
    /// Offending setting, e.g. `token` or `log_level`
    pub key: Option<&'static str>,
    /// What went wrong
    pub message: String,
    /// Line that raised the error
    pub line: u32,
    /// File that raised the error
    pub file: &'static str,
}

impl ConfigError {
    /// Error not tied to a single setting.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            key: None,
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }

    /// Error blamed on one setting.
    ///
    /// # Examples
    ///
    /// ```
    /// use octa_error::ConfigError;
    ///
    /// let err = ConfigError::for_key("token", "no bot token configured");
    /// assert_eq!(err.key, Some("token"));
    /// assert!(err.to_string().starts_with("Config error in 'token': no bot token"));
    /// ```
    #[track_caller]
    pub fn for_key(key: &'static str, message: impl Into<String>) -> Self {
        Self {
            key: Some(key),
            ..Self::new(message)
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.key {
            Some(key) => write!(f, "Config error in '{}': {}", key, self.message)?,
            None => write!(f, "Config error: {}", self.message)?,
        }
        write!(f, " at line {} in {}", self.line, self.file)
    }
}
