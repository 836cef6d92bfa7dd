//! Product categories derived from a project's raw type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The product a project belongs to.
///
/// Derived exclusively from the project's raw type; see the classifier in
/// `bulk-delete-core`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    /// OS packages and container images.
    Container,
    /// Infrastructure-as-code manifests.
    Iac,
    /// Static code analysis.
    Sast,
    /// Open source dependency manifests.
    Opensource,
    /// Raw type not present in any membership list.
    Unknown,
}

impl ProductCategory {
    /// All categories, in declaration order.
    pub const ALL: [ProductCategory; 5] = [
        ProductCategory::Container,
        ProductCategory::Iac,
        ProductCategory::Sast,
        ProductCategory::Opensource,
        ProductCategory::Unknown,
    ];

    /// Returns the lowercase name used on the command line and in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::Container => "container",
            ProductCategory::Iac => "iac",
            ProductCategory::Sast => "sast",
            ProductCategory::Opensource => "opensource",
            ProductCategory::Unknown => "unknown",
        }
    }

    /// Returns true for every category except `Unknown`.
    pub fn is_known(&self) -> bool {
        !matches!(self, ProductCategory::Unknown)
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no product category.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown product '{0}', expected one of: container, iac, sast, opensource")]
pub struct ParseCategoryError(pub String);

impl FromStr for ProductCategory {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        ProductCategory::ALL
            .into_iter()
            .filter(ProductCategory::is_known)
            .find(|c| c.as_str() == lowered)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}
