//! Command schema validation errors.

/// Specific schema error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum SchemaErrorKind {
    /// A command declares options alongside subcommands or groups,
    /// or a root handler alongside subcommands.
    #[display("Command '{}' mixes options or a root handler with subcommands", _0)]
    ConflictingShape(String),

    /// Name is empty, too long, or uses characters outside `[a-z0-9_-]`.
    #[display("Invalid name '{}': {}", name, reason)]
    InvalidName {
        /// The offending name
        name: String,
        /// Why it was rejected
        reason: String,
    },

    /// Description is empty or too long.
    #[display("Invalid description for '{}': {}", owner, reason)]
    InvalidDescription {
        /// Name of the entity owning the description
        owner: String,
        /// Why it was rejected
        reason: String,
    },

    /// Two entries at the same level share a name.
    #[display("Duplicate name '{}' in '{}'", name, parent)]
    DuplicateName {
        /// Containing command, group, or subcommand
        parent: String,
        /// The repeated name
        name: String,
    },

    /// Too many options, subcommands, or choices at one level.
    #[display("'{}' declares {} {}, limit is {}", parent, count, what, limit)]
    TooMany {
        /// Containing entity
        parent: String,
        /// What was counted
        what: &'static str,
        /// Declared count
        count: usize,
        /// Allowed maximum
        limit: usize,
    },

    /// A required option follows an optional one.
    #[display("Required option '{}' in '{}' follows an optional option", option, parent)]
    RequiredAfterOptional {
        /// Containing entity
        parent: String,
        /// The misplaced required option
        option: String,
    },

    /// Kind-specific constraints are inconsistent.
    #[display("Invalid constraint on option '{}': {}", option, reason)]
    InvalidConstraint {
        /// The option carrying the constraint
        option: String,
        /// What is wrong with it
        reason: String,
    },

    /// A subcommand group has no subcommands.
    #[display("Subcommand group '{}' has no subcommands", _0)]
    EmptyGroup(String),
}

/// Schema error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Schema Error: {} at line {} in {}", kind, line, file)]
pub struct SchemaError {
    kind: SchemaErrorKind,
    line: u32,
    file: &'static str,
}

impl SchemaError {
    /// Create a new schema error with caller location tracking.
    #[track_caller]
    pub fn new(kind: SchemaErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &SchemaErrorKind {
        &self.kind
    }
}
