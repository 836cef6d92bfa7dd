//! Raw project type to product category lookup.

use bulk_delete_models::ProductCategory;
use tracing::warn;

/// Raw types produced by container and OS package scanning.
pub const CONTAINER_TYPES: &[&str] = &["deb", "linux", "dockerfile", "rpm", "apk"];

/// Raw types produced by infrastructure-as-code scanning.
pub const IAC_TYPES: &[&str] = &[
    "k8sconfig",
    "helmconfig",
    "terraformconfig",
    "armconfig",
    "cloudformationconfig",
];

/// Raw types produced by static code analysis.
pub const SAST_TYPES: &[&str] = &["sast"];

/// Raw types produced by open source dependency scanning.
pub const OPENSOURCE_TYPES: &[&str] = &[
    "cocoapods",
    "composer",
    "cpp",
    "golangdep",
    "gomodules",
    "govendor",
    "gradle",
    "hex",
    "maven",
    "npm",
    "nuget",
    "paket",
    "pip",
    "pipenv",
    "poetry",
    "rubygems",
    "sbt",
    "swift",
    "yarn",
];

const MEMBERSHIP: [(ProductCategory, &[&str]); 4] = [
    (ProductCategory::Container, CONTAINER_TYPES),
    (ProductCategory::Iac, IAC_TYPES),
    (ProductCategory::Sast, SAST_TYPES),
    (ProductCategory::Opensource, OPENSOURCE_TYPES),
];

/// Maps a raw project type to its product category.
///
/// Matching is exact and case-sensitive. Anything not in a membership list
/// is [`ProductCategory::Unknown`] and emits a warning.
pub fn classify(raw_type: &str) -> ProductCategory {
    match lookup(raw_type) {
        Some(category) => category,
        None => {
            warn!(raw_type = %raw_type, "Unknown project type");
            ProductCategory::Unknown
        }
    }
}

/// Silent lookup; `None` when the type is not listed.
pub fn lookup(raw_type: &str) -> Option<ProductCategory> {
    MEMBERSHIP
        .iter()
        .find(|(_, types)| types.contains(&raw_type))
        .map(|(category, _)| *category)
}
