//! Gateway connection errors.

/// Gateway error variants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum GatewayErrorKind {
    /// The wrapped client could not be constructed.
    #[display("Failed to build client: {_0}")]
    ClientBuild(String),

    /// Login or the gateway session ended with an error.
    #[display("Connection failed: {_0}")]
    ConnectionFailed(String),

    /// Bot token is missing or rejected.
    #[display("Invalid or missing bot token")]
    InvalidToken,

    /// A REST call made outside registration failed.
    #[display("HTTP request failed: {_0}")]
    Http(String),
}

/// Gateway error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Gateway Error: {} at line {} in {}", kind, line, file)]
pub struct GatewayError {
    kind: GatewayErrorKind,
    line: u32,
    file: &'static str,
}

impl GatewayError {
    /// Create a new GatewayError with automatic location tracking.
    ///
    /// # Example
    /// ```
    /// use octa_error::{GatewayError, GatewayErrorKind};
    ///
    /// let err = GatewayError::new(GatewayErrorKind::InvalidToken);
    /// assert_eq!(err.kind(), &GatewayErrorKind::InvalidToken);
    /// ```
    #[track_caller]
    pub fn new(kind: GatewayErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &GatewayErrorKind {
        &self.kind
    }
}
