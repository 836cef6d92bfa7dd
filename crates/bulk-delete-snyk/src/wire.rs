//! Response envelopes of the v1 API.

use bulk_delete_models::{Organization, Project};
use serde::Deserialize;

/// `GET /orgs`
#[derive(Debug, Deserialize)]
pub(crate) struct OrgsResponse {
    #[serde(default)]
    pub orgs: Vec<Organization>,
}

/// `POST /org/{orgId}/projects`
#[derive(Debug, Deserialize)]
pub(crate) struct ProjectsResponse {
    #[serde(default)]
    pub projects: Vec<Project>,
}
