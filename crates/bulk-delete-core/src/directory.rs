//! The project directory the engine reads from and mutates.
//!
//! The engine never talks to the network itself. Every listing and every
//! mutation goes through [`ProjectDirectory`], which the Snyk client (and
//! the test fakes) implement.

use bulk_delete_models::{Organization, Project};
use thiserror::Error;

/// Errors reported by a project directory.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// Credentials were missing, invalid or lack permission.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The request could not be completed.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response could not be decoded.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl DirectoryError {
    /// Returns true for credential failures.
    pub fn is_auth(&self) -> bool {
        matches!(self, DirectoryError::Auth(_))
    }
}

/// Access to organizations and projects.
///
/// Mutations are not idempotent: deleting an already deleted project is an
/// error, so callers must invoke each mutation at most once per entity.
///
/// # Example
///
/// ```ignore
/// use bulk_delete_core::ProjectDirectory;
///
/// fn count_projects(directory: &dyn ProjectDirectory) -> usize {
///     directory
///         .list_organizations()
///         .unwrap_or_default()
///         .iter()
///         .filter_map(|org| directory.list_projects(org).ok())
///         .map(|projects| projects.len())
///         .sum()
/// }
/// ```
pub trait ProjectDirectory {
    /// Lists every organization visible to the current credentials.
    fn list_organizations(&self) -> Result<Vec<Organization>, DirectoryError>;

    /// Lists the projects of an organization, freshly queried.
    fn list_projects(&self, org: &Organization) -> Result<Vec<Project>, DirectoryError>;

    /// Stops monitoring a project without deleting it.
    fn deactivate_project(&self, project: &Project) -> Result<(), DirectoryError>;

    /// Deletes a project.
    fn delete_project(&self, project: &Project) -> Result<(), DirectoryError>;

    /// Deletes an organization.
    fn delete_organization(&self, org: &Organization) -> Result<(), DirectoryError>;
}
