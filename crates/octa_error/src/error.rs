//! Top-level error wrapper types.

use crate::{ConfigError, DispatchError, GatewayError, JobError, SchemaError};

/// Union of every error the framework can surface.
///
/// # Examples
///
/// ```
/// use octa_error::{ConfigError, OctaError};
///
/// let err: OctaError = ConfigError::for_key("token", "no bot token configured").into();
/// assert!(format!("{}", err).contains("Config error in 'token'"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum OctaErrorKind {
    /// Command schema rejected at construction time
    #[from(SchemaError)]
    Schema(SchemaError),
    /// Listener or registration failure during dispatch
    #[from(DispatchError)]
    Dispatch(DispatchError),
    /// Client construction or login failure
    #[from(GatewayError)]
    Gateway(GatewayError),
    /// Startup job failure
    #[from(JobError)]
    Job(JobError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
}

/// Octa error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Octa Error: {}", _0)]
pub struct OctaError(Box<OctaErrorKind>);

impl OctaError {
    /// Create a new error from a kind.
    pub fn new(kind: OctaErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &OctaErrorKind {
        &self.0
    }
}

impl<T> From<T> for OctaError
where
    T: Into<OctaErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Octa operations.
pub type OctaResult<T> = std::result::Result<T, OctaError>;
