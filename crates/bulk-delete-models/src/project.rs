//! Project records as reported by the directory.
//!
//! Projects are immutable from the tool's point of view; they only change
//! through the directory's deactivate and delete operations.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::ids::{OrgId, ProjectId};

/// Timestamp layout used by the directory and by the `--after`/`--before`
/// bounds, e.g. `2023-09-01T00:00:00.000Z`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

/// Reference from a project back to the organization that owns it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationRef {
    /// Owning organization id.
    pub id: OrgId,
    /// Owning organization slug.
    pub slug: String,
}

/// A project monitored by the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Directory-assigned identifier.
    pub id: ProjectId,

    /// Project name, usually `<repo>:<manifest path>`.
    pub name: String,

    /// Raw ecosystem identifier (sca-type), e.g. `npm` or `dockerfile`.
    #[serde(rename = "type")]
    pub raw_type: String,

    /// Integration that created the project, e.g. `github` or `cli`.
    #[serde(default)]
    pub origin: String,

    /// Creation time as reported, in [`TIMESTAMP_FORMAT`].
    ///
    /// Kept as text; parsing failures are reported by the date matcher.
    #[serde(rename = "created")]
    pub created_at: String,

    /// Whether scanning is currently active.
    #[serde(default)]
    pub is_monitored: bool,

    /// Read-only (public) projects can never be modified.
    #[serde(rename = "readOnly", default)]
    pub is_read_only: bool,

    /// Owning organization. Filled in by the directory client.
    #[serde(skip)]
    pub organization: OrganizationRef,

    /// Remote repository URL, when imported from an SCM integration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_repo_url: Option<String>,

    /// Monitored branch, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
}

impl Project {
    /// Creates an active, writable project created now.
    pub fn new(
        id: impl Into<ProjectId>,
        name: impl Into<String>,
        raw_type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            raw_type: raw_type.into(),
            origin: String::new(),
            created_at: Utc::now().format(TIMESTAMP_FORMAT).to_string(),
            is_monitored: true,
            is_read_only: false,
            organization: OrganizationRef::default(),
            remote_repo_url: None,
            branch: None,
        }
    }

    /// Sets the origin.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    /// Sets the creation timestamp.
    pub fn with_created_at(mut self, created_at: impl Into<String>) -> Self {
        self.created_at = created_at.into();
        self
    }

    /// Sets whether the project is monitored (active).
    pub fn with_monitored(mut self, monitored: bool) -> Self {
        self.is_monitored = monitored;
        self
    }

    /// Sets whether the project is read-only.
    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.is_read_only = read_only;
        self
    }

    /// Sets the owning organization.
    pub fn with_organization(mut self, id: impl Into<OrgId>, slug: impl Into<String>) -> Self {
        self.organization = OrganizationRef {
            id: id.into(),
            slug: slug.into(),
        };
        self
    }

    /// Sets the remote repository URL.
    pub fn with_remote_repo_url(mut self, url: impl Into<String>) -> Self {
        self.remote_repo_url = Some(url.into());
        self
    }

    /// Sets the branch.
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    /// Best human-facing locator: remote URL, then branch, then name.
    ///
    /// Empty strings are treated as absent.
    pub fn display_url(&self) -> &str {
        [self.remote_repo_url.as_deref(), self.branch.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .unwrap_or(&self.name)
    }
}
