//! Command-line interface definition using clap.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

use bulk_delete_core::{CoreError, FilterConfig, ProductCategory};

use crate::config;

const AFTER_HELP: &str = "\
Set SNYK_TOKEN as an environment variable (or in .env.local) to use this tool.

Repeat list filters for many values, e.g. --orgs=org1 --orgs=org2.
Timestamps use ISO 8601 in UTC, e.g. 2023-09-01T00:00:00.000Z.

Exit codes: 0 success, 1 authentication or configuration error,
2 usage error or malformed timestamp.";

/// Deactivate or delete Snyk projects in bulk based on a set of filters.
///
/// By default this performs a dry run; add --force to apply changes.
#[derive(Parser, Debug)]
#[command(name = "snyk-bulk-delete")]
#[command(version, about, long_about, after_long_help = AFTER_HELP)]
#[command(disable_help_flag = true)]
pub struct Cli {
    /// Print this help
    #[arg(short, long, action = ArgAction::SetTrue)]
    pub help: bool,

    /// Apply changes; without it nothing is deactivated or deleted
    #[arg(long)]
    pub force: bool,

    /// Delete active projects instead of deactivating them
    #[arg(long)]
    pub delete: bool,

    /// Delete inactive projects; only inactive projects are targeted
    #[arg(long)]
    pub delete_inactive_projects: bool,

    /// Delete organizations that have no projects left
    #[arg(long)]
    pub delete_empty_orgs: bool,

    /// Only projects created at or after this time
    #[arg(long, visible_alias = "after-date", value_name = "TIMESTAMP")]
    pub after: Option<String>,

    /// Only projects created at or before this time
    #[arg(long, visible_alias = "before-date", value_name = "TIMESTAMP")]
    pub before: Option<String>,

    /// Organization slug to process; '!' for all organizations
    #[arg(long = "orgs", value_name = "SLUG")]
    pub orgs: Vec<String>,

    /// Organization slug to exclude from processing and deletion
    #[arg(long, value_name = "SLUG")]
    pub org_excludes: Vec<String>,

    /// Project origin to target (github, github-enterprise, cli, ...)
    #[arg(long, value_name = "ORIGIN")]
    pub origins: Vec<String>,

    /// Project type to target (deb, dockerfile, npm, sast, ...)
    #[arg(long, value_name = "TYPE")]
    pub sca_types: Vec<String>,

    /// Product to target (container, iac, sast, opensource)
    #[arg(long, value_name = "PRODUCT")]
    pub products: Vec<ProductCategory>,

    /// Product to exclude
    #[arg(long, visible_alias = "product_excludes", value_name = "PRODUCT")]
    pub product_excludes: Vec<ProductCategory>,

    /// Projects whose name contains this text are never targeted
    #[arg(long, value_name = "TEXT")]
    pub name_excludes: Vec<String>,

    /// Log file, appended to on every run
    #[arg(long, env = config::LOG_FILE_ENV, default_value = config::DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Snyk API base URL
    #[arg(long, env = config::API_URL_ENV, default_value = bulk_delete_snyk::DEFAULT_API_URL)]
    pub api_url: String,

    /// Enable verbose output (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Builds the run's filter configuration.
    ///
    /// # Errors
    /// Usage errors and malformed `--after`/`--before` values.
    pub fn filter_config(&self) -> Result<FilterConfig, CoreError> {
        let mut builder = FilterConfig::builder()
            .force(self.force)
            .delete(self.delete)
            .delete_inactive_only(self.delete_inactive_projects)
            .delete_empty_orgs(self.delete_empty_orgs);

        for slug in &self.orgs {
            builder = builder.org(slug);
        }
        for slug in &self.org_excludes {
            builder = builder.exclude_org(slug);
        }
        for origin in &self.origins {
            builder = builder.origin(origin);
        }
        for sca_type in &self.sca_types {
            builder = builder.sca_type(sca_type);
        }
        for product in &self.products {
            builder = builder.product(*product);
        }
        for product in &self.product_excludes {
            builder = builder.exclude_product(*product);
        }
        for fragment in &self.name_excludes {
            builder = builder.exclude_name(fragment);
        }
        if let Some(after) = &self.after {
            builder = builder.after(after.clone());
        }
        if let Some(before) = &self.before {
            builder = builder.before(before.clone());
        }

        builder.build()
    }

    /// Returns the log level based on verbosity and the `DEBUG` variable.
    pub fn log_level(&self, debug_env: bool) -> tracing::Level {
        match (self.verbose, debug_env) {
            (0, false) => tracing::Level::INFO,
            (0, true) | (1, _) => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}
