//! Error types for building the Snyk client.

use thiserror::Error;

/// Errors raised while configuring the client.
///
/// Errors from individual API calls are reported as
/// [`bulk_delete_core::DirectoryError`].
#[derive(Error, Debug)]
pub enum SnykError {
    /// API token is empty.
    #[error("API token is empty")]
    EmptyToken,

    /// API base URL could not be parsed.
    #[error("invalid API url '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Result type alias for client construction.
pub type Result<T> = std::result::Result<T, SnykError>;
