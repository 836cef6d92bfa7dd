//! Tracing setup: console on stderr plus an appended log file.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;

use tracing::{Level, Subscriber};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{CliError, Result};

/// Builds the subscriber without installing it.
///
/// `RUST_LOG` takes precedence over `level`. Console output goes to stderr
/// so stdout only carries the run summary.
///
/// # Errors
/// [`CliError::LogFile`] when the log file cannot be opened for appending.
pub fn subscriber(level: Level, log_file: &Path) -> Result<impl Subscriber + Send + Sync> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .map_err(|source| CliError::LogFile {
            path: log_file.to_path_buf(),
            source,
        })?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string().to_lowercase()));

    let console = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let file_layer = fmt::layer()
        .with_target(false)
        .with_ansi(false)
        .with_writer(Arc::new(file));

    Ok(tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer))
}

/// Installs the global subscriber.
///
/// # Errors
/// [`CliError::LogFile`] for an unopenable log file and
/// [`CliError::LoggingInit`] when a global subscriber is already set.
pub fn init(level: Level, log_file: &Path) -> Result<()> {
    subscriber(level, log_file)?.try_init()?;
    Ok(())
}
