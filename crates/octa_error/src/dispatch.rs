//! Event dispatch errors.

/// Error type returned by user handlers.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Result type returned by user handlers.
pub type HandlerResult = Result<(), HandlerError>;

/// Specific dispatch error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum DispatchErrorKind {
    /// A listener returned an error.
    #[display("Listener for '{}' failed: {}", event, reason)]
    HandlerFailed {
        /// Event the listener was subscribed to
        event: String,
        /// Error text reported by the handler
        reason: String,
    },

    /// A listener panicked while handling an event.
    #[display("Listener for '{}' panicked: {}", event, reason)]
    HandlerPanicked {
        /// Event the listener was subscribed to
        event: String,
        /// Panic payload, when it was a string
        reason: String,
    },

    /// Pushing command payloads to the registration endpoint failed.
    #[display("Command registration failed for {}: {}", scope, reason)]
    RegistrationFailed {
        /// "global" or "guild <id>"
        scope: String,
        /// Transport error text
        reason: String,
    },
}

/// Dispatch error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Dispatch Error: {} at line {} in {}", kind, line, file)]
pub struct DispatchError {
    kind: DispatchErrorKind,
    line: u32,
    file: &'static str,
}

impl DispatchError {
    /// Create a new dispatch error with caller location tracking.
    #[track_caller]
    pub fn new(kind: DispatchErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &DispatchErrorKind {
        &self.kind
    }
}
