//! Eligibility classification and action engine for bulk project cleanup.
//!
//! Given the organizations and projects reported by a [`ProjectDirectory`]
//! and a frozen [`FilterConfig`], the engine:
//!
//! - derives each project's product category from its raw type,
//! - decides whether the project is in scope,
//! - deactivates or deletes it (never in a dry run),
//! - deletes organizations left without projects, when asked to,
//! - records exactly one outcome per entity in a [`RunReport`].
//!
//! A failed mutation is recorded and the run moves on; only malformed
//! timestamps and authentication failures stop a run.
//!
//! # Example
//!
//! ```ignore
//! use bulk_delete_core::{CleanupRun, FilterConfig, ProductCategory};
//!
//! let config = FilterConfig::builder()
//!     .org("platform-team")
//!     .product(ProductCategory::Container)
//!     .build()?;
//!
//! let organizations = directory.list_organizations()?;
//! let report = CleanupRun::new(&directory, &config).run(&organizations)?;
//! print!("{}", report.summarize());
//! ```

pub mod action;
pub mod classifier;
pub mod date_range;
pub mod directory;
pub mod error;
pub mod filter;
pub mod report;
pub mod run;

#[cfg(test)]
mod test_support;

pub use action::{decide, Action, ActionOrchestrator, Decision};
pub use classifier::classify;
pub use date_range::{in_range, parse_timestamp, DateRange};
pub use directory::{DirectoryError, ProjectDirectory};
pub use error::{CoreError, Result};
pub use filter::{is_eligible, Eligibility, FilterConfig, FilterConfigBuilder, OrgScope, SkipReason};
pub use report::{ActionOutcome, EntityKind, OutcomeKind, RecordedEntity, RunReport, RunSummary};
pub use run::{CleanupRun, RunAborted};

// Re-export the model types the engine's API is expressed in.
pub use bulk_delete_models::{Organization, ProductCategory, Project, TIMESTAMP_FORMAT};
