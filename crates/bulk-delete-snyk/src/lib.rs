//! Snyk API client for the bulk delete tool.
//!
//! [`SnykClient`] implements [`bulk_delete_core::ProjectDirectory`] over the
//! Snyk v1 REST API using blocking HTTP calls. Pagination and retries are
//! not handled.
//!
//! # Example
//!
//! ```no_run
//! use bulk_delete_core::ProjectDirectory;
//! use bulk_delete_snyk::{SnykClient, SnykConfig};
//!
//! let config = SnykConfig::new("my-api-token");
//! let client = SnykClient::new(config).unwrap();
//! for org in client.list_organizations().unwrap() {
//!     println!("{} ({})", org.name, org.slug);
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
mod wire;

pub use client::SnykClient;
pub use config::{SnykConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT};
pub use error::{Result, SnykError};
