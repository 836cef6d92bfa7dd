//! Blocking client for the Snyk v1 API.

use bulk_delete_core::{DirectoryError, ProjectDirectory};
use bulk_delete_models::{Organization, OrganizationRef, Project};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::SnykConfig;
use crate::error::{Result, SnykError};
use crate::wire::{OrgsResponse, ProjectsResponse};

/// Snyk API client implementing [`ProjectDirectory`].
pub struct SnykClient {
    http: Client,
    base_url: Url,
    token: String,
}

impl SnykClient {
    /// Builds a client from its configuration.
    ///
    /// # Errors
    /// Fails when the token is empty, the base URL does not parse, or the
    /// HTTP client cannot be built.
    pub fn new(config: SnykConfig) -> Result<Self> {
        if config.token.trim().is_empty() {
            return Err(SnykError::EmptyToken);
        }
        let base_url = config.base_url()?;
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("snyk-bulk-delete/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            token: config.token,
        })
    }

    /// Resolves a path relative to the API base.
    fn endpoint(&self, path: &str) -> std::result::Result<Url, DirectoryError> {
        self.base_url
            .join(path)
            .map_err(|e| DirectoryError::Transport(format!("invalid endpoint '{}': {}", path, e)))
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("Authorization", format!("token {}", self.token))
            .header("Accept", "application/json")
    }

    fn send(&self, request: RequestBuilder) -> std::result::Result<Response, DirectoryError> {
        let response = self
            .authorized(request)
            .send()
            .map_err(|e| DirectoryError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        Err(status_error(status, &body))
    }

    fn decode<T: DeserializeOwned>(response: Response) -> std::result::Result<T, DirectoryError> {
        response
            .json::<T>()
            .map_err(|e| DirectoryError::Decode(e.to_string()))
    }
}

/// Maps a non-success status to a directory error.
fn status_error(status: StatusCode, body: &str) -> DirectoryError {
    let message = if body.trim().is_empty() {
        status.to_string()
    } else {
        format!("{}: {}", status, body.trim())
    };
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => DirectoryError::Auth(message),
        _ => DirectoryError::Transport(message),
    }
}

impl ProjectDirectory for SnykClient {
    fn list_organizations(&self) -> std::result::Result<Vec<Organization>, DirectoryError> {
        let url = self.endpoint("orgs")?;
        debug!(url = %url, "Listing organizations");
        let response = self.send(self.http.get(url))?;
        Ok(Self::decode::<OrgsResponse>(response)?.orgs)
    }

    fn list_projects(&self, org: &Organization) -> std::result::Result<Vec<Project>, DirectoryError> {
        let url = self.endpoint(&format!("org/{}/projects", org.id))?;
        debug!(url = %url, org = %org.slug, "Listing projects");
        let body = serde_json::json!({ "filters": {} });
        let response = self.send(self.http.post(url).json(&body))?;

        let owner = OrganizationRef {
            id: org.id.clone(),
            slug: org.slug.clone(),
        };
        Ok(Self::decode::<ProjectsResponse>(response)?
            .projects
            .into_iter()
            .map(|mut project| {
                project.organization = owner.clone();
                project
            })
            .collect())
    }

    fn deactivate_project(&self, project: &Project) -> std::result::Result<(), DirectoryError> {
        let url = self.endpoint(&format!(
            "org/{}/project/{}/deactivate",
            project.organization.id, project.id
        ))?;
        self.send(self.http.post(url))?;
        Ok(())
    }

    fn delete_project(&self, project: &Project) -> std::result::Result<(), DirectoryError> {
        let url = self.endpoint(&format!(
            "org/{}/project/{}",
            project.organization.id, project.id
        ))?;
        self.send(self.http.delete(url))?;
        Ok(())
    }

    fn delete_organization(&self, org: &Organization) -> std::result::Result<(), DirectoryError> {
        let url = self.endpoint(&format!("org/{}", org.id))?;
        self.send(self.http.delete(url))?;
        Ok(())
    }
}
