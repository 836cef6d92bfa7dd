//! Single-threaded driver over organizations and their projects.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use bulk_delete_models::Organization;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::action::ActionOrchestrator;
use crate::directory::ProjectDirectory;
use crate::error::{CoreError, Result};
use crate::filter::FilterConfig;
use crate::report::{ActionOutcome, RunReport};

/// A run stopped by a fatal error.
///
/// `report` holds every outcome recorded before the error, including
/// mutations already applied to the directory.
#[derive(Error, Debug)]
#[error("{error}")]
pub struct RunAborted {
    pub error: CoreError,
    pub report: RunReport,
}

/// One cleanup pass.
///
/// Organizations are processed in the given order and projects in listing
/// order. The cancel flag is checked before every organization and every
/// project; once set, iteration stops and the partial report is returned.
pub struct CleanupRun<'a, D: ProjectDirectory + ?Sized> {
    directory: &'a D,
    config: &'a FilterConfig,
    cancel: Arc<AtomicBool>,
}

impl<'a, D: ProjectDirectory + ?Sized> CleanupRun<'a, D> {
    /// Creates a run that can only be stopped through [`Self::cancel_flag`].
    pub fn new(directory: &'a D, config: &'a FilterConfig) -> Self {
        Self {
            directory,
            config,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Uses an externally owned flag, e.g. one set by a signal handler.
    pub fn with_cancel_flag(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = cancel;
        self
    }

    /// The flag that stops this run when set.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    fn cancelled(&self) -> bool {
        self.cancel.load(Ordering::SeqCst)
    }

    /// Processes every eligible organization.
    ///
    /// # Errors
    /// Returns [`RunAborted`] with the partial report when:
    /// - a project timestamp is malformed ([`CoreError::DateParse`]);
    /// - listing projects fails with an authentication error
    ///   ([`CoreError::Directory`]). Other listing failures skip the
    ///   organization.
    pub fn run(&self, organizations: &[Organization]) -> std::result::Result<RunReport, RunAborted> {
        let mut report = RunReport::new();

        if let Err(error) = self.process(organizations, &mut report) {
            error!(error = %error, "Run aborted");
            return Err(RunAborted { error, report });
        }

        if report.interrupted() {
            error!("User interrupted, aborting");
        }

        Ok(report)
    }

    fn process(&self, organizations: &[Organization], report: &mut RunReport) -> Result<()> {
        let orchestrator = ActionOrchestrator::new(self.directory, self.config);
        let org_total = organizations.len();

        if self.config.orgs().is_empty() {
            warn!("No --orgs to process entered, use '!' for all, or define slugs");
        }

        for (org_index, org) in organizations.iter().enumerate() {
            if self.cancelled() {
                report.mark_interrupted();
                return Ok(());
            }

            if !self.config.is_org_eligible(org) {
                continue;
            }

            info!(
                "[{}/{}] Processing projects for organization: {}",
                org_index + 1,
                org_total,
                org.label()
            );

            let projects = match self.directory.list_projects(org) {
                Ok(projects) => projects,
                Err(e) if e.is_auth() => return Err(e.into()),
                Err(e) => {
                    error!(org = %org.label(), error = %e, "Failed to list projects, skipping organization");
                    continue;
                }
            };
            info!(org = %org.label(), count = projects.len(), "Listed projects");

            let mut deleted = HashSet::new();
            for (project_index, project) in projects.iter().enumerate() {
                if self.cancelled() {
                    report.mark_interrupted();
                    return Ok(());
                }

                debug!(
                    "Org: [{}/{}] - Project: [{}/{}] - {}",
                    org_index + 1,
                    org_total,
                    project_index + 1,
                    projects.len(),
                    org.label()
                );

                let outcome = orchestrator.process_project(project)?;
                if outcome == ActionOutcome::Deleted {
                    deleted.insert(project.id.clone());
                }
                report.record_project(project, outcome);
            }

            if let Some(outcome) = orchestrator.cleanup_organization(org, &deleted) {
                report.record_organization(org, outcome);
            }
        }

        Ok(())
    }
}
