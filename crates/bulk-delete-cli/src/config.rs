//! Environment-driven configuration.

use crate::error::{CliError, Result};

/// API token variable. Required.
pub const TOKEN_ENV: &str = "SNYK_TOKEN";
/// Optional override of the Snyk API base URL.
pub const API_URL_ENV: &str = "SNYK_API_URL";
/// Optional override of the log file path.
pub const LOG_FILE_ENV: &str = "SNYK_BULK_DELETE_LOG";
/// When set to any value, logs at debug level.
pub const DEBUG_ENV: &str = "DEBUG";

/// Log file used when neither `--log-file` nor the variable is given.
pub const DEFAULT_LOG_FILE: &str = "snyk-bulk-delete.log";

/// Loads `.env.local`, then `.env`. Values already in the environment win.
pub fn load_env() {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::dotenv();
}

/// Reads the API token from the environment.
///
/// # Errors
/// [`CliError::MissingToken`] when the variable is unset or blank.
pub fn snyk_token() -> Result<String> {
    token_from(std::env::var(TOKEN_ENV).ok())
}

fn token_from(value: Option<String>) -> Result<String> {
    match value {
        Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        _ => Err(CliError::MissingToken),
    }
}

/// Returns true when `DEBUG` is set.
pub fn debug_enabled() -> bool {
    std::env::var_os(DEBUG_ENV).is_some()
}
