//! Action selection and execution for eligible projects and empty
//! organizations.

use std::collections::HashSet;
use std::fmt;

use bulk_delete_models::{Organization, ProductCategory, Project, ProjectId};
use tracing::{debug, error, info, warn};

use crate::classifier::classify;
use crate::directory::ProjectDirectory;
use crate::error::Result;
use crate::filter::{Eligibility, FilterConfig, SkipReason};
use crate::report::ActionOutcome;

/// Mutation applied to a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Deactivate,
    Delete,
}

impl Action {
    /// Outcome recorded when the action succeeds.
    pub fn success(&self) -> ActionOutcome {
        match self {
            Action::Deactivate => ActionOutcome::Deactivated,
            Action::Delete => ActionOutcome::Deleted,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Deactivate => write!(f, "Deactivating"),
            Action::Delete => write!(f, "Deleting"),
        }
    }
}

/// What to do with an eligible project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Act(Action),
    Skip(SkipReason),
}

/// Chooses the action from the project's activity state and the mode flags.
///
/// | monitored | inactive-only | deactivate-only | decision   |
/// |-----------|---------------|-----------------|------------|
/// | yes       | no            | yes             | deactivate |
/// | yes       | no            | no              | delete     |
/// | yes       | yes           | any             | skip       |
/// | no        | yes           | any             | delete     |
/// | no        | no            | any             | skip       |
pub fn decide(project: &Project, config: &FilterConfig) -> Decision {
    match (project.is_monitored, config.delete_inactive_only()) {
        (true, false) if config.deactivate_only() => Decision::Act(Action::Deactivate),
        (true, false) => Decision::Act(Action::Delete),
        (true, true) => Decision::Skip(SkipReason::ActiveProject),
        (false, true) => Decision::Act(Action::Delete),
        (false, false) => Decision::Skip(SkipReason::InactiveProject),
    }
}

/// Applies decisions through a [`ProjectDirectory`].
///
/// In a dry run nothing is sent to the directory and the outcome is
/// recorded as if the mutation had succeeded. Otherwise each mutation is
/// called at most once and a failure becomes [`ActionOutcome::Failed`].
pub struct ActionOrchestrator<'a, D: ProjectDirectory + ?Sized> {
    directory: &'a D,
    config: &'a FilterConfig,
}

impl<'a, D: ProjectDirectory + ?Sized> ActionOrchestrator<'a, D> {
    /// Creates an orchestrator over a directory and a frozen config.
    pub fn new(directory: &'a D, config: &'a FilterConfig) -> Self {
        Self { directory, config }
    }

    /// Classifies, filters, decides and (unless dry run) executes.
    ///
    /// # Errors
    /// Only [`crate::CoreError::DateParse`], for a malformed project
    /// timestamp. Mutation failures are returned as `Ok(Failed(_))`.
    pub fn process_project(&self, project: &Project) -> Result<ActionOutcome> {
        let category = classify(&project.raw_type);

        if let Eligibility::Ineligible(reason) = self.config.evaluate(project, category)? {
            debug!(
                project = %project.name,
                url = %project.display_url(),
                reason = %reason,
                "Skipping unmatched project"
            );
            return Ok(ActionOutcome::Skipped(reason));
        }

        match decide(project, self.config) {
            Decision::Skip(reason) => {
                debug!(project = %project.name, reason = %reason, "Skipping project");
                Ok(ActionOutcome::Skipped(reason))
            }
            Decision::Act(action) => Ok(self.execute(action, project, category)),
        }
    }

    fn execute(&self, action: Action, project: &Project, category: ProductCategory) -> ActionOutcome {
        warn!(
            project = %project.name,
            org = %project.organization.slug,
            origin = %project.origin,
            project_type = %project.raw_type,
            product = %category,
            url = %project.display_url(),
            dry_run = self.config.dry_run(),
            "{} project",
            action
        );

        if self.config.dry_run() {
            return action.success();
        }

        let result = match action {
            Action::Deactivate => self.directory.deactivate_project(project),
            Action::Delete => self.directory.delete_project(project),
        };

        match result {
            Ok(()) => action.success(),
            Err(e) => {
                error!(
                    project = %project.name,
                    url = %project.display_url(),
                    error = %e,
                    "Error {} project",
                    action.to_string().to_lowercase()
                );
                ActionOutcome::Failed(e)
            }
        }
    }

    /// Deletes the organization when it has no projects left.
    ///
    /// The project list is re-queried from the directory. In a dry run the
    /// projects this run would have deleted are still listed, so they are
    /// discounted; a forced run trusts the listing alone. Returns `None`
    /// when cleanup is disabled or the organization still has projects.
    pub fn cleanup_organization(
        &self,
        org: &Organization,
        deleted_this_run: &HashSet<ProjectId>,
    ) -> Option<ActionOutcome> {
        if !self.config.delete_empty_orgs() {
            return None;
        }

        info!(org = %org.label(), "Delete empty org flag set, checking if empty");
        let remaining = match self.directory.list_projects(org) {
            Ok(projects) if self.config.dry_run() => projects
                .iter()
                .filter(|p| !deleted_this_run.contains(&p.id))
                .count(),
            Ok(projects) => projects.len(),
            Err(e) => {
                error!(org = %org.label(), error = %e, "Error listing projects of organization");
                return Some(ActionOutcome::Failed(e));
            }
        };

        if remaining > 0 {
            info!(org = %org.label(), remaining, "Organization not empty, continuing");
            return None;
        }

        warn!(org = %org.label(), dry_run = self.config.dry_run(), "Deleting empty organization");
        if self.config.dry_run() {
            return Some(ActionOutcome::Deleted);
        }

        Some(match self.directory.delete_organization(org) {
            Ok(()) => ActionOutcome::Deleted,
            Err(e) => {
                error!(org = %org.label(), error = %e, "Error deleting organization");
                ActionOutcome::Failed(e)
            }
        })
    }
}
