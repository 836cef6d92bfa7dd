//! Snyk bulk delete command-line tool.
//!
//! Deactivates or deletes projects in bulk based on a set of filters.
//! Every run is a dry run unless `--force` is given.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;

pub use error::{CliError, Result};
