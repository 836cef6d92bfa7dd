//! Organization records.

use serde::{Deserialize, Serialize};

use crate::ids::OrgId;

/// An organization in the project directory.
///
/// The project count is never stored here; it is re-queried from the
/// directory whenever it matters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    /// Directory-assigned identifier.
    pub id: OrgId,

    /// Display name.
    pub name: String,

    /// Stable key used for org filters.
    pub slug: String,

    /// Web URL of the organization, when the directory reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Organization {
    /// Creates an organization with the given id, name and slug.
    pub fn new(id: impl Into<OrgId>, name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            slug: slug.into(),
            url: None,
        }
    }

    /// Sets the web URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Label used in log lines: the URL when known, the slug otherwise.
    pub fn label(&self) -> &str {
        self.url.as_deref().unwrap_or(&self.slug)
    }
}
