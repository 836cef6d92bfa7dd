//! Data models for the bulk delete tool.
//!
//! This crate provides the records exchanged with the project directory:
//! organizations, the projects they own, and the product category derived
//! from a project's raw type.

pub mod category;
pub mod ids;
pub mod organization;
pub mod project;

// Re-export main types
pub use category::{ParseCategoryError, ProductCategory};
pub use ids::{OrgId, ProjectId};
pub use organization::Organization;
pub use project::{OrganizationRef, Project, TIMESTAMP_FORMAT};
