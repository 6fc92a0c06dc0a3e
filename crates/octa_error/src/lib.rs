//! Error types for the Octa command framework.
//!
//! Every concern gets its own error type so callers can match on the
//! failure they care about without string inspection.
//!
//! # Error Hierarchy
//!
//! Errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use octa_error::{OctaResult, SchemaError, SchemaErrorKind};
//!
//! fn validate() -> OctaResult<()> {
//!     Err(SchemaError::new(SchemaErrorKind::ConflictingShape("ping".into())))?
//! }
//!
//! assert!(validate().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod dispatch;
mod error;
mod gateway;
mod job;
mod schema;

pub use config::ConfigError;
pub use dispatch::{DispatchError, DispatchErrorKind, HandlerError, HandlerResult};
pub use error::{OctaError, OctaErrorKind, OctaResult};
pub use gateway::{GatewayError, GatewayErrorKind};
pub use job::JobError;
pub use schema::{SchemaError, SchemaErrorKind};
