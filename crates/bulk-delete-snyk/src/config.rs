//! Client configuration.

use std::time::Duration;

use url::Url;

use crate::error::{Result, SnykError};

/// Default Snyk v1 API base.
pub const DEFAULT_API_URL: &str = "https://api.snyk.io/v1";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for [`crate::SnykClient`].
#[derive(Debug, Clone)]
pub struct SnykConfig {
    /// API token sent as `Authorization: token <token>`.
    pub token: String,
    /// API base URL.
    pub api_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl SnykConfig {
    /// Creates a config for the public API.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the API base URL, e.g. for a regional or private instance.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Parses the base URL, ending it with `/` so relative joins append.
    pub(crate) fn base_url(&self) -> Result<Url> {
        let mut raw = self.api_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        Url::parse(&raw).map_err(|source| SnykError::InvalidUrl {
            url: self.api_url.clone(),
            source,
        })
    }
}
