//! Per-kind resource service
//!
//! Holds a flat list of resources of one kind. Lookups are linear scans by
//! name; identifiers are unique within a service.

use super::call::{GetIamPolicyCall, SetIamPolicyCall};
use super::search::SearchCall;
use crate::error::{MockError, Result};
use crate::iam::{GetIamPolicyRequest, Policy, PolicyGenerator, SetIamPolicyRequest};
use crate::resource::{Folder, Organization, Project, Resource};
use tracing::{debug, warn};

/// In-memory service for one resource kind
#[derive(Debug, Clone)]
pub struct ResourceService<R: Resource> {
    resources: Vec<R>,
    generator: PolicyGenerator,
}

pub type OrganizationsService = ResourceService<Organization>;
pub type FoldersService = ResourceService<Folder>;
pub type ProjectsService = ResourceService<Project>;

impl<R: Resource> ResourceService<R> {
    /// Empty service with an entropy-seeded generator
    pub fn new() -> Self {
        Self::with_generator(PolicyGenerator::new())
    }

    /// Empty service that uses `generator` for bulk generation
    pub fn with_generator(generator: PolicyGenerator) -> Self {
        ResourceService {
            resources: Vec::new(),
            generator,
        }
    }

    /// Register a resource
    ///
    /// # Errors
    ///
    /// Returns `AlreadyExists` if a resource with the same name is present.
    pub fn insert(&mut self, resource: R) -> Result<&R> {
        if self.contains(resource.name()) {
            warn!("Rejecting duplicate {} '{}'", R::KIND, resource.name());
            return Err(MockError::AlreadyExists(resource.name().to_string()));
        }
        debug!("Adding {} '{}'", R::KIND, resource.name());
        self.resources.push(resource);
        Ok(&self.resources[self.resources.len() - 1])
    }

    /// Create and register a resource; a missing policy becomes an empty one
    pub fn create(
        &mut self,
        name: impl Into<String>,
        attribute: impl Into<String>,
        policy: Option<Policy>,
    ) -> Result<&R> {
        let resource = R::build(name.into(), attribute.into(), policy.unwrap_or_default());
        self.insert(resource)
    }

    /// Add `count` resources named `<collection>/<base>-<n>` with random policies
    ///
    /// `n` starts at a random number and counts up; names already in use are
    /// skipped, so the list always grows by exactly `count`. Returns the new
    /// resources.
    pub fn generate(&mut self, count: usize, base_name: &str) -> &[R] {
        let start = self.resources.len();
        let mut number = u64::from(self.generator.start_number());

        while self.resources.len() - start < count {
            let name = R::KIND.name_for(&format!("{}-{}", base_name, number));
            number += 1;
            if self.contains(&name) {
                continue;
            }
            let policy = self.generator.policy();
            self.resources.push(R::build(name, String::new(), policy));
        }

        debug!("Generated {} {}s from base '{}'", count, R::KIND, base_name);
        &self.resources[start..]
    }

    /// First resource whose policy equals `policy`
    ///
    /// Only meant for tests that need to recover the resource a policy was
    /// attached to; when several resources share a policy the first wins.
    pub fn find_policy(&self, policy: &Policy) -> Option<&R> {
        self.resources.iter().find(|r| r.policy() == policy)
    }

    /// Build a get-policy call for `resource`
    pub fn get_iam_policy(
        &self,
        resource: impl Into<String>,
        request: GetIamPolicyRequest,
    ) -> GetIamPolicyCall<'_, R> {
        GetIamPolicyCall::new(self, resource.into(), request)
    }

    /// Build a set-policy call for `resource`
    pub fn set_iam_policy(
        &mut self,
        resource: impl Into<String>,
        request: SetIamPolicyRequest,
    ) -> SetIamPolicyCall<'_, R> {
        SetIamPolicyCall::new(self, resource.into(), request)
    }

    /// Build a search call; set the filter with `query`
    pub fn search(&self) -> SearchCall<'_, R> {
        SearchCall::new(self)
    }

    pub fn get(&self, name: &str) -> Option<&R> {
        self.resources.iter().find(|r| r.name() == name)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut R> {
        self.resources.iter_mut().find(|r| r.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// All resources in insertion order
    pub fn list(&self) -> &[R] {
        &self.resources
    }

    /// Direct access to the backing list.
    ///
    /// Bypasses the duplicate check done by `insert`.
    pub fn list_mut(&mut self) -> &mut Vec<R> {
        &mut self.resources
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn generator_mut(&mut self) -> &mut PolicyGenerator {
        &mut self.generator
    }
}

impl<R: Resource> Default for ResourceService<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceService<Organization> {
    /// Create an organization; a missing policy becomes an empty one
    pub fn new_organization(
        &mut self,
        organization_id: impl Into<String>,
        domain: impl Into<String>,
        policy: Option<Policy>,
    ) -> Result<&Organization> {
        self.create(organization_id, domain, policy)
    }

    /// Add `count` organizations with random policies
    pub fn generate_organizations(&mut self, count: usize, base_name: &str) -> &[Organization] {
        self.generate(count, base_name)
    }
}

impl ResourceService<Folder> {
    /// Create a folder; a missing policy becomes an empty one
    pub fn new_folder(
        &mut self,
        folder_id: impl Into<String>,
        display_name: impl Into<String>,
        policy: Option<Policy>,
    ) -> Result<&Folder> {
        self.create(folder_id, display_name, policy)
    }

    /// Add `count` folders with random policies. Generated folders use their
    /// name as display name.
    pub fn generate_folders(&mut self, count: usize, base_name: &str) -> &[Folder] {
        let start = self.len();
        self.generate(count, base_name);
        for folder in &mut self.resources[start..] {
            folder.display_name = folder.folder_id.clone();
        }
        &self.resources[start..]
    }
}

impl ResourceService<Project> {
    /// Create a project; a missing policy becomes an empty one
    pub fn new_project(
        &mut self,
        project_id: impl Into<String>,
        display_name: impl Into<String>,
        policy: Option<Policy>,
    ) -> Result<&Project> {
        self.create(project_id, display_name, policy)
    }

    /// Add `count` projects with random policies
    pub fn generate_projects(&mut self, count: usize, base_name: &str) -> &[Project] {
        self.generate(count, base_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iam::Binding;

    fn service() -> ProjectsService {
        ResourceService::with_generator(PolicyGenerator::seeded(11))
    }

    #[test]
    fn test_new_project_defaults_to_empty_policy() {
        let mut projects = service();
        let project = projects
            .new_project("projects/TestProject", "Test Project", None)
            .unwrap();

        assert_eq!(project.project_id, "projects/TestProject");
        assert!(project.policy.is_empty());
        assert_eq!(projects.len(), 1);
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut projects = service();
        projects.new_project("projects/dup", "", None).unwrap();

        let err = projects.new_project("projects/dup", "other", None).unwrap_err();
        assert!(matches!(err, MockError::AlreadyExists(ref n) if n == "projects/dup"));
        assert_eq!(projects.len(), 1);
    }

    #[test]
    fn test_generate_adds_exact_count() {
        let mut projects = service();
        let generated = projects.generate_projects(5, "gen");
        assert_eq!(generated.len(), 5);
        assert!(generated.iter().all(|p| p.project_id.starts_with("projects/gen-")));
        assert!(generated.iter().all(|p| (10..=19).contains(&p.policy.bindings.len())));

        assert_eq!(projects.len(), 5);
        projects.generate_projects(3, "gen");
        assert_eq!(projects.len(), 8);
    }

    #[test]
    fn test_generate_numbers_are_consecutive() {
        let mut projects = service();
        let ids: Vec<u64> = projects
            .generate_projects(4, "seq")
            .iter()
            .map(|p| p.project_id.rsplit('-').next().unwrap().parse().unwrap())
            .collect();

        for pair in ids.windows(2) {
            assert_eq!(pair[1], pair[0] + 1);
        }
    }

    #[test]
    fn test_generate_skips_taken_names() {
        let mut projects = ProjectsService::with_generator(PolicyGenerator::seeded(5));
        let start = PolicyGenerator::seeded(5).start_number();
        projects
            .new_project(format!("projects/base-{}", start), "", None)
            .unwrap();

        // Same seed, so generation starts on the taken name
        projects.generate_projects(2, "base");

        assert_eq!(projects.len(), 3);
        let mut names: Vec<&str> = projects.list().iter().map(|p| p.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 3);
    }

    #[test]
    fn test_generate_folders_sets_display_name() {
        let mut folders = FoldersService::with_generator(PolicyGenerator::seeded(3));
        for folder in folders.generate_folders(3, "f") {
            assert_eq!(folder.display_name, folder.folder_id);
        }
    }

    #[test]
    fn test_find_policy() {
        let mut projects = service();
        projects.generate_projects(3, "noise");

        let policy = Policy::new(vec![Binding::new("roles/owner", ["user:me@example.com"])]);
        projects
            .new_project("projects/target", "", Some(policy.clone()))
            .unwrap();

        let found = projects.find_policy(&policy).unwrap();
        assert_eq!(found.project_id, "projects/target");

        let other = Policy::new(vec![Binding::new("roles/none", ["user:x@example.com"])]);
        assert!(projects.find_policy(&other).is_none());
    }

    #[test]
    fn test_find_policy_returns_first_match() {
        let mut orgs = OrganizationsService::with_generator(PolicyGenerator::seeded(1));
        orgs.new_organization("organizations/1", "a.com", None).unwrap();
        orgs.new_organization("organizations/2", "b.com", None).unwrap();

        let found = orgs.find_policy(&Policy::empty()).unwrap();
        assert_eq!(found.organization_id, "organizations/1");
    }

    #[test]
    fn test_list_mut_is_direct() {
        let mut projects = service();
        projects
            .list_mut()
            .push(Project::build("projects/raw".to_string(), String::new(), Policy::empty()));
        assert!(projects.contains("projects/raw"));
    }
}
