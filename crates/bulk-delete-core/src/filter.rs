//! Run-wide filter configuration and the eligibility predicates.
//!
//! A [`FilterConfig`] is built once per run by [`FilterConfigBuilder::build`]
//! and is read-only afterwards. Every declared filter dimension must match;
//! undeclared dimensions pass.

use std::collections::BTreeSet;
use std::fmt;

use bulk_delete_models::{Organization, ProductCategory, Project};
use tracing::{debug, error, info, warn};

use crate::date_range::{parse_timestamp, DateRange};
use crate::error::{CoreError, Result};

/// Which organizations a run may touch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrgScope {
    /// Every organization visible to the credentials (`--orgs=!`).
    All,
    /// Only organizations whose slug is listed.
    Slugs(BTreeSet<String>),
}

impl Default for OrgScope {
    fn default() -> Self {
        OrgScope::Slugs(BTreeSet::new())
    }
}

impl OrgScope {
    /// Returns true when the slug is selected.
    pub fn contains(&self, slug: &str) -> bool {
        match self {
            OrgScope::All => true,
            OrgScope::Slugs(slugs) => slugs.contains(slug),
        }
    }

    /// Returns true when nothing is selected.
    pub fn is_empty(&self) -> bool {
        matches!(self, OrgScope::Slugs(slugs) if slugs.is_empty())
    }
}

/// Why a project was not acted upon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Read-only (public) projects are never modified.
    ReadOnly,
    /// The raw type maps to no known product.
    UnknownCategory,
    /// The project name contains an excluded substring.
    NameExcluded(String),
    /// `--sca-types` was given and the raw type is not in it.
    ScaTypeNotSelected,
    /// `--origins` was given and the origin is not in it.
    OriginNotSelected,
    /// The product is listed in `--product-excludes`.
    ProductExcluded,
    /// `--products` was given and the product is not in it.
    ProductNotSelected,
    /// Created outside the `--after`/`--before` window.
    OutsideDateRange,
    /// Active project while only inactive projects are targeted.
    ActiveProject,
    /// Inactive project while only active projects are targeted.
    InactiveProject,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::ReadOnly => write!(f, "read-only project"),
            SkipReason::UnknownCategory => write!(f, "unknown project type"),
            SkipReason::NameExcluded(pattern) => write!(f, "name matches exclude '{}'", pattern),
            SkipReason::ScaTypeNotSelected => write!(f, "type not in sca-types"),
            SkipReason::OriginNotSelected => write!(f, "origin not in origins"),
            SkipReason::ProductExcluded => write!(f, "product excluded"),
            SkipReason::ProductNotSelected => write!(f, "product not in products"),
            SkipReason::OutsideDateRange => write!(f, "created outside date range"),
            SkipReason::ActiveProject => write!(f, "active project, inactive-only mode"),
            SkipReason::InactiveProject => write!(f, "inactive project, active-only mode"),
        }
    }
}

/// Result of evaluating a project against the filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Eligibility {
    /// Every declared filter matched.
    Eligible,
    /// The first filter that rejected the project.
    Ineligible(SkipReason),
}

impl Eligibility {
    /// Returns true for [`Eligibility::Eligible`].
    pub fn is_eligible(&self) -> bool {
        matches!(self, Eligibility::Eligible)
    }
}

/// Immutable filter and mode configuration for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig {
    orgs: OrgScope,
    org_excludes: BTreeSet<String>,
    origins: BTreeSet<String>,
    sca_types: BTreeSet<String>,
    products: BTreeSet<ProductCategory>,
    product_excludes: BTreeSet<ProductCategory>,
    name_excludes: BTreeSet<String>,
    dates: DateRange,
    deactivate_only: bool,
    delete_inactive_only: bool,
    dry_run: bool,
    delete_empty_orgs: bool,
}

impl FilterConfig {
    /// Starts a builder with the safe defaults: dry run, deactivate.
    pub fn builder() -> FilterConfigBuilder {
        FilterConfigBuilder::new()
    }

    pub fn orgs(&self) -> &OrgScope {
        &self.orgs
    }

    pub fn org_excludes(&self) -> &BTreeSet<String> {
        &self.org_excludes
    }

    pub fn origins(&self) -> &BTreeSet<String> {
        &self.origins
    }

    pub fn sca_types(&self) -> &BTreeSet<String> {
        &self.sca_types
    }

    pub fn products(&self) -> &BTreeSet<ProductCategory> {
        &self.products
    }

    pub fn product_excludes(&self) -> &BTreeSet<ProductCategory> {
        &self.product_excludes
    }

    /// Lower-cased name substrings.
    pub fn name_excludes(&self) -> &BTreeSet<String> {
        &self.name_excludes
    }

    pub fn dates(&self) -> &DateRange {
        &self.dates
    }

    /// Active projects are deactivated rather than deleted.
    pub fn deactivate_only(&self) -> bool {
        self.deactivate_only
    }

    /// Only inactive projects are targeted, and they are deleted.
    pub fn delete_inactive_only(&self) -> bool {
        self.delete_inactive_only
    }

    /// Actions are computed and recorded but never sent.
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Organizations left without projects are deleted.
    pub fn delete_empty_orgs(&self) -> bool {
        self.delete_empty_orgs
    }

    /// Returns true when at least one set filter is declared.
    pub fn has_content_filters(&self) -> bool {
        !self.orgs.is_empty()
            || !self.org_excludes.is_empty()
            || !self.origins.is_empty()
            || !self.sca_types.is_empty()
            || !self.products.is_empty()
            || !self.product_excludes.is_empty()
            || !self.name_excludes.is_empty()
    }

    /// Organization-level filter: selected and not excluded.
    pub fn is_org_eligible(&self, org: &Organization) -> bool {
        if self.org_excludes.contains(&org.slug) {
            warn!(org = %org.slug, "Organization skipped, in org excludes");
            return false;
        }
        if !self.orgs.contains(&org.slug) {
            debug!(org = %org.slug, "Organization skipped, not in selected orgs");
            return false;
        }
        true
    }

    /// Evaluates the project-level predicates in order.
    ///
    /// The creation timestamp is parsed before anything else so that a
    /// malformed timestamp is fatal regardless of the other filters.
    pub fn evaluate(&self, project: &Project, category: ProductCategory) -> Result<Eligibility> {
        let created_at = parse_timestamp(&project.created_at)?;

        if project.is_read_only {
            info!(
                project = %project.name,
                project_type = %project.raw_type,
                origin = %project.origin,
                product = %category,
                "Skipping read-only (public) project"
            );
            return Ok(Eligibility::Ineligible(SkipReason::ReadOnly));
        }

        if !category.is_known() {
            error!(
                project = %project.name,
                project_type = %project.raw_type,
                origin = %project.origin,
                "Not processing unknown project type"
            );
            return Ok(Eligibility::Ineligible(SkipReason::UnknownCategory));
        }

        let name = project.name.to_lowercase();
        if let Some(pattern) = self.name_excludes.iter().find(|p| name.contains(p.as_str())) {
            return Ok(Eligibility::Ineligible(SkipReason::NameExcluded(
                pattern.clone(),
            )));
        }

        if !self.sca_types.is_empty() && !self.sca_types.contains(&project.raw_type) {
            return Ok(Eligibility::Ineligible(SkipReason::ScaTypeNotSelected));
        }

        if !self.origins.is_empty() && !self.origins.contains(&project.origin) {
            return Ok(Eligibility::Ineligible(SkipReason::OriginNotSelected));
        }

        if self.product_excludes.contains(&category) {
            return Ok(Eligibility::Ineligible(SkipReason::ProductExcluded));
        }

        if !self.products.is_empty() && !self.products.contains(&category) {
            return Ok(Eligibility::Ineligible(SkipReason::ProductNotSelected));
        }

        if !self.dates.contains_time(created_at) {
            return Ok(Eligibility::Ineligible(SkipReason::OutsideDateRange));
        }

        Ok(Eligibility::Eligible)
    }
}

/// Returns true when the project passes every declared filter.
pub fn is_eligible(project: &Project, category: ProductCategory, config: &FilterConfig) -> Result<bool> {
    Ok(config.evaluate(project, category)?.is_eligible())
}

/// Validating builder for [`FilterConfig`].
///
/// Set values are lower-cased; product names are parsed into categories.
#[derive(Debug, Clone)]
pub struct FilterConfigBuilder {
    all_orgs: bool,
    orgs: BTreeSet<String>,
    org_excludes: BTreeSet<String>,
    origins: BTreeSet<String>,
    sca_types: BTreeSet<String>,
    products: BTreeSet<ProductCategory>,
    product_excludes: BTreeSet<ProductCategory>,
    name_excludes: BTreeSet<String>,
    after: Option<String>,
    before: Option<String>,
    delete: bool,
    delete_inactive_only: bool,
    force: bool,
    delete_empty_orgs: bool,
}

impl Default for FilterConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

impl FilterConfigBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self {
            all_orgs: false,
            orgs: BTreeSet::new(),
            org_excludes: BTreeSet::new(),
            origins: BTreeSet::new(),
            sca_types: BTreeSet::new(),
            products: BTreeSet::new(),
            product_excludes: BTreeSet::new(),
            name_excludes: BTreeSet::new(),
            after: None,
            before: None,
            delete: false,
            delete_inactive_only: false,
            force: false,
            delete_empty_orgs: false,
        }
    }

    /// Selects an organization by slug; `!` selects all of them.
    pub fn org(mut self, slug: &str) -> Self {
        if slug.trim() == "!" {
            self.all_orgs = true;
        } else {
            self.orgs.insert(normalize(slug));
        }
        self
    }

    /// Excludes an organization by slug.
    pub fn exclude_org(mut self, slug: &str) -> Self {
        self.org_excludes.insert(normalize(slug));
        self
    }

    /// Restricts to projects with this origin.
    pub fn origin(mut self, origin: &str) -> Self {
        self.origins.insert(normalize(origin));
        self
    }

    /// Restricts to projects with this raw type.
    pub fn sca_type(mut self, sca_type: &str) -> Self {
        self.sca_types.insert(normalize(sca_type));
        self
    }

    /// Restricts to projects of this product.
    pub fn product(mut self, product: ProductCategory) -> Self {
        self.products.insert(product);
        self
    }

    /// Excludes projects of this product.
    pub fn exclude_product(mut self, product: ProductCategory) -> Self {
        self.product_excludes.insert(product);
        self
    }

    /// Excludes projects whose name contains this substring.
    pub fn exclude_name(mut self, fragment: &str) -> Self {
        let fragment = normalize(fragment);
        if !fragment.is_empty() {
            self.name_excludes.insert(fragment);
        }
        self
    }

    /// Only projects created at or after this timestamp.
    pub fn after(mut self, timestamp: impl Into<String>) -> Self {
        self.after = Some(timestamp.into());
        self
    }

    /// Only projects created at or before this timestamp.
    pub fn before(mut self, timestamp: impl Into<String>) -> Self {
        self.before = Some(timestamp.into());
        self
    }

    /// Delete active projects instead of deactivating them.
    pub fn delete(mut self, delete: bool) -> Self {
        self.delete = delete;
        self
    }

    /// Target only inactive projects, deleting them.
    pub fn delete_inactive_only(mut self, enabled: bool) -> Self {
        self.delete_inactive_only = enabled;
        self
    }

    /// Apply actions instead of a dry run.
    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Delete organizations left without projects.
    pub fn delete_empty_orgs(mut self, enabled: bool) -> Self {
        self.delete_empty_orgs = enabled;
        self
    }

    /// Validates and freezes the configuration.
    ///
    /// # Errors
    /// - [`CoreError::DateParse`] when a bound is malformed.
    /// - [`CoreError::Usage`] when no set filter is declared and empty
    ///   organization cleanup is off.
    pub fn build(self) -> Result<FilterConfig> {
        let dates = DateRange::parse(self.after.as_deref(), self.before.as_deref())?;

        let orgs = if self.all_orgs {
            OrgScope::All
        } else {
            OrgScope::Slugs(self.orgs)
        };

        let config = FilterConfig {
            orgs,
            org_excludes: self.org_excludes,
            origins: self.origins,
            sca_types: self.sca_types,
            products: self.products,
            product_excludes: self.product_excludes,
            name_excludes: self.name_excludes,
            dates,
            deactivate_only: !self.delete && !self.delete_inactive_only,
            delete_inactive_only: self.delete_inactive_only,
            dry_run: !self.force,
            delete_empty_orgs: self.delete_empty_orgs,
        };

        if !config.has_content_filters() && !config.delete_empty_orgs {
            return Err(CoreError::Usage(
                "no filters defined, define one of: orgs, org-excludes, origins, sca-types, \
                 products, product-excludes, name-excludes"
                    .to_string(),
            ));
        }

        Ok(config)
    }
}
