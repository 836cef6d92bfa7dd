//! Error types and exit codes for the command-line tool.

use std::path::PathBuf;

use bulk_delete_core::{CoreError, DirectoryError};
use bulk_delete_snyk::SnykError;
use thiserror::Error;

/// Exit code for a successful (possibly interrupted) run.
pub const EXIT_OK: i32 = 0;
/// Exit code for authentication and configuration errors.
pub const EXIT_CONFIG: i32 = 1;
/// Exit code for usage errors and malformed timestamps.
pub const EXIT_USAGE: i32 = 2;

/// Errors that end the process.
#[derive(Error, Debug)]
pub enum CliError {
    /// Engine error: usage, timestamp or directory failure.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// `SNYK_TOKEN` is not set.
    #[error("Please set your SNYK_TOKEN as an environment variable")]
    MissingToken,

    /// Snyk client could not be configured.
    #[error("client configuration error: {0}")]
    Client(#[from] SnykError),

    /// Log file could not be opened.
    #[error("failed to open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A global tracing subscriber was already installed.
    #[error("failed to initialize logging: {0}")]
    LoggingInit(#[from] tracing_subscriber::util::TryInitError),

    /// Interrupt handler could not be registered.
    #[error("failed to install interrupt handler: {0}")]
    Signal(#[source] std::io::Error),
}

impl From<DirectoryError> for CliError {
    fn from(e: DirectoryError) -> Self {
        CliError::Core(CoreError::Directory(e))
    }
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Core(CoreError::Usage(_)) | CliError::Core(CoreError::DateParse { .. }) => {
                EXIT_USAGE
            }
            _ => EXIT_CONFIG,
        }
    }

    /// Returns true when the usage text should follow the error message.
    pub fn shows_usage(&self) -> bool {
        matches!(
            self,
            CliError::Core(CoreError::Usage(_))
                | CliError::MissingToken
                | CliError::Core(CoreError::Directory(DirectoryError::Auth(_)))
        )
    }
}

/// Result type alias for the command-line tool.
pub type Result<T> = std::result::Result<T, CliError>;
