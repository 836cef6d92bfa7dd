//! Error types for the core engine.

use thiserror::Error;

use crate::directory::DirectoryError;

/// Errors that stop a run.
///
/// Per-project and per-organization mutation failures are not errors at
/// this level; they are recorded as `ActionOutcome::Failed`.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Invalid combination of options.
    #[error("usage error: {0}")]
    Usage(String),

    /// A bound or a project timestamp did not match the timestamp format.
    #[error("invalid timestamp '{value}': {source}")]
    DateParse {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// The project directory failed outside of a per-item mutation.
    #[error("directory error: {0}")]
    Directory(#[from] DirectoryError),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
