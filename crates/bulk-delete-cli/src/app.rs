//! Top-level run: configuration, directory access, cleanup and summary.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use bulk_delete_core::{CleanupRun, FilterConfig, ProjectDirectory, RunAborted, RunSummary};
use bulk_delete_snyk::{SnykClient, SnykConfig};
use signal_hook::consts::{SIGINT, SIGTERM};
use tracing::{info, warn};

use crate::cli::Cli;
use crate::config;
use crate::error::{CliError, Result, EXIT_CONFIG, EXIT_OK};

/// Runs one cleanup pass and returns the process exit code.
///
/// The filter configuration is validated before any network access.
///
/// # Errors
/// Usage errors, a missing token, authentication failures and client setup
/// failures. Per-project failures are counted in the summary instead.
pub fn run(cli: &Cli) -> Result<i32> {
    let filters = cli.filter_config()?;
    log_mode(&filters);

    let token = config::snyk_token()?;
    let client = SnykClient::new(SnykConfig::new(token).with_api_url(cli.api_url.as_str()))?;

    let summary = execute(&client, &filters, install_interrupt_handler()?)?;
    emit_summary(&summary);

    if filters.dry_run() {
        info!("**** DRY RUN COMPLETE NOTHING DELETED ****");
    } else {
        info!("**** ACTIONS APPLIED, PLEASE CHECK LOGS FOR ERRORS ****");
    }

    Ok(EXIT_OK)
}

/// Lists organizations and runs the cleanup against any directory.
///
/// When the run aborts, the partial summary is emitted before the error is
/// returned.
///
/// # Errors
/// Directory failures while listing organizations, authentication failures
/// while listing projects, and malformed project timestamps.
pub fn execute<D: ProjectDirectory + ?Sized>(
    directory: &D,
    filters: &FilterConfig,
    cancel: Arc<AtomicBool>,
) -> Result<RunSummary> {
    let organizations = directory.list_organizations()?;
    info!(count = organizations.len(), "Found organizations");

    match CleanupRun::new(directory, filters)
        .with_cancel_flag(cancel)
        .run(&organizations)
    {
        Ok(report) => Ok(report.summarize()),
        Err(RunAborted { error, report }) => {
            emit_summary(&report.summarize());
            Err(error.into())
        }
    }
}

fn log_mode(filters: &FilterConfig) {
    if filters.dry_run() {
        info!("**** RUNNING IN DRY RUN MODE, NOTHING WILL BE DELETED ****");
    } else {
        warn!("**** FORCE FLAG DETECTED, ACTIONS WILL BE APPLIED ****");
    }
    if filters.deactivate_only() {
        info!("Active projects will be deactivated, not deleted");
    }
}

/// The first SIGINT/SIGTERM sets the returned flag; a second one exits
/// immediately with status 1.
fn install_interrupt_handler() -> Result<Arc<AtomicBool>> {
    let flag = Arc::new(AtomicBool::new(false));
    for signal in [SIGINT, SIGTERM] {
        signal_hook::flag::register_conditional_shutdown(signal, EXIT_CONFIG, Arc::clone(&flag))
            .map_err(CliError::Signal)?;
        signal_hook::flag::register(signal, Arc::clone(&flag)).map_err(CliError::Signal)?;
    }
    Ok(flag)
}

fn emit_summary(summary: &RunSummary) {
    for line in summary.lines() {
        info!("{}", line);
        println!("{}", line);
    }
}
