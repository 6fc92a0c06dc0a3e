//! Startup job errors.

/// A raw startup job failed before login.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Job Error: work item {} failed: {} at line {} in {}", index, message, line, file)]
pub struct JobError {
    /// Position of the failing item in the work queue
    pub index: usize,
    /// Error message reported by the job
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl JobError {
    /// Create a new JobError for the work item at `index`.
    #[track_caller]
    pub fn new(index: usize, message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            index,
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
