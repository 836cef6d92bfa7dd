//! In-memory project directory for driving the engine in tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use bulk_delete_core::{DirectoryError, ProjectDirectory};
use bulk_delete_models::{OrgId, Organization, Project, ProjectId};

/// Every call the engine made, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListOrganizations,
    ListProjects(OrgId),
    Deactivate(ProjectId),
    DeleteProject(ProjectId),
    DeleteOrganization(OrgId),
}

impl Call {
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Call::Deactivate(_) | Call::DeleteProject(_) | Call::DeleteOrganization(_)
        )
    }
}

/// Directory backed by plain collections.
///
/// Deleting a project removes it, so later listings reflect the deletion.
/// Deleting something twice is a transport error, as with the real API.
#[derive(Default)]
pub struct FakeDirectory {
    orgs: RefCell<Vec<Organization>>,
    projects: RefCell<BTreeMap<OrgId, Vec<Project>>>,
    calls: RefCell<Vec<Call>>,
    failing: HashSet<String>,
    list_failures: HashSet<OrgId>,
    auth_failure: bool,
    stale_listing: bool,
    cancel_on_mutation: Option<Arc<AtomicBool>>,
}

impl FakeDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an organization owning the given projects.
    pub fn with_org(self, org: Organization, projects: Vec<Project>) -> Self {
        let projects = projects
            .into_iter()
            .map(|p| p.with_organization(org.id.clone(), org.slug.clone()))
            .collect();
        self.projects.borrow_mut().insert(org.id.clone(), projects);
        self.orgs.borrow_mut().push(org);
        self
    }

    /// Mutations on this project or organization id fail.
    pub fn failing_on(mut self, id: &str) -> Self {
        self.failing.insert(id.to_string());
        self
    }

    /// Listing this organization's projects fails.
    pub fn failing_list(mut self, org: &str) -> Self {
        self.list_failures.insert(OrgId::from(org));
        self
    }

    /// Every listing fails with an authentication error.
    pub fn with_auth_failure(mut self) -> Self {
        self.auth_failure = true;
        self
    }

    /// Deleted projects keep showing up in listings.
    pub fn with_stale_listing(mut self) -> Self {
        self.stale_listing = true;
        self
    }

    /// Sets the flag as soon as the first mutation is attempted.
    pub fn cancel_on_mutation(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel_on_mutation = Some(flag);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn mutation_count(&self) -> usize {
        self.calls.borrow().iter().filter(|c| c.is_mutation()).count()
    }

    pub fn organizations(&self) -> Vec<Organization> {
        self.orgs.borrow().clone()
    }

    pub fn remaining_projects(&self, org: &str) -> usize {
        self.projects
            .borrow()
            .get(&OrgId::from(org))
            .map(Vec::len)
            .unwrap_or(0)
    }

    fn mutate(&self, call: Call, id: &str) -> Result<(), DirectoryError> {
        self.calls.borrow_mut().push(call);
        if let Some(flag) = &self.cancel_on_mutation {
            flag.store(true, Ordering::SeqCst);
        }
        if self.failing.contains(id) {
            return Err(DirectoryError::Transport(format!("500 Internal Server Error for {id}")));
        }
        Ok(())
    }
}

impl ProjectDirectory for FakeDirectory {
    fn list_organizations(&self) -> Result<Vec<Organization>, DirectoryError> {
        self.calls.borrow_mut().push(Call::ListOrganizations);
        if self.auth_failure {
            return Err(DirectoryError::Auth("401 Unauthorized".to_string()));
        }
        Ok(self.orgs.borrow().clone())
    }

    fn list_projects(&self, org: &Organization) -> Result<Vec<Project>, DirectoryError> {
        self.calls.borrow_mut().push(Call::ListProjects(org.id.clone()));
        if self.auth_failure {
            return Err(DirectoryError::Auth("401 Unauthorized".to_string()));
        }
        if self.list_failures.contains(&org.id) {
            return Err(DirectoryError::Transport("502 Bad Gateway".to_string()));
        }
        Ok(self
            .projects
            .borrow()
            .get(&org.id)
            .cloned()
            .unwrap_or_default())
    }

    fn deactivate_project(&self, project: &Project) -> Result<(), DirectoryError> {
        self.mutate(Call::Deactivate(project.id.clone()), project.id.as_str())?;
        let mut projects = self.projects.borrow_mut();
        let stored = projects
            .get_mut(&project.organization.id)
            .and_then(|list| list.iter_mut().find(|p| p.id == project.id))
            .ok_or_else(|| DirectoryError::Transport("404 Not Found".to_string()))?;
        stored.is_monitored = false;
        Ok(())
    }

    fn delete_project(&self, project: &Project) -> Result<(), DirectoryError> {
        self.mutate(Call::DeleteProject(project.id.clone()), project.id.as_str())?;
        if self.stale_listing {
            return Ok(());
        }
        let mut projects = self.projects.borrow_mut();
        let list = projects
            .get_mut(&project.organization.id)
            .ok_or_else(|| DirectoryError::Transport("404 Not Found".to_string()))?;
        let before = list.len();
        list.retain(|p| p.id != project.id);
        if list.len() == before {
            return Err(DirectoryError::Transport("404 Not Found".to_string()));
        }
        Ok(())
    }

    fn delete_organization(&self, org: &Organization) -> Result<(), DirectoryError> {
        self.mutate(Call::DeleteOrganization(org.id.clone()), org.id.as_str())?;
        let mut orgs = self.orgs.borrow_mut();
        let before = orgs.len();
        orgs.retain(|o| o.id != org.id);
        if orgs.len() == before {
            return Err(DirectoryError::Transport("404 Not Found".to_string()));
        }
        self.projects.borrow_mut().remove(&org.id);
        Ok(())
    }
}

pub const CREATED: &str = "2023-06-15T08:00:00.000Z";

/// Active, writable project created at [`CREATED`].
pub fn project(id: &str, name: &str, raw_type: &str) -> Project {
    Project::new(id, name, raw_type)
        .with_origin("github")
        .with_created_at(CREATED)
}

pub fn org(id: &str, slug: &str) -> Organization {
    Organization::new(id, slug.to_uppercase(), slug)
}
