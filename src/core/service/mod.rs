//! Mock Resource Manager service
//!
//! `MockService` bundles one `ResourceService` per resource kind, mirroring
//! the `organizations`, `folders` and `projects` sub-services of the real
//! client. State can be seeded from and dumped to JSON fixtures.

mod call;
mod resources;
mod search;

pub use call::{
    FoldersGetIamPolicyCall, FoldersSetIamPolicyCall, GetIamPolicyCall,
    OrganizationsGetIamPolicyCall, OrganizationsSetIamPolicyCall, PolicyCall,
    ProjectsGetIamPolicyCall, ProjectsSetIamPolicyCall, SetIamPolicyCall,
};
pub use resources::{FoldersService, OrganizationsService, ProjectsService, ResourceService};
pub use search::{
    FoldersSearchCall, OrganizationsSearchCall, ProjectsSearchCall, SearchCall,
    SearchFoldersResponse, SearchOrganizationsResponse, SearchProjectsResponse, SearchResponse,
};

use crate::config::{GeneratorConfig, MockConfig};
use crate::error::Result;
use crate::iam::PolicyGenerator;
use crate::resource::{Folder, Organization, Project, Resource};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Serializable snapshot of every resource in a `MockService`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fixture {
    pub organizations: Vec<Organization>,
    pub folders: Vec<Folder>,
    pub projects: Vec<Project>,
}

impl Fixture {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}

/// In-memory stand-in for the Cloud Resource Manager service
#[derive(Debug, Clone)]
pub struct MockService {
    pub organizations: OrganizationsService,
    pub folders: FoldersService,
    pub projects: ProjectsService,
}

impl MockService {
    /// Empty service with default generator settings
    pub fn new() -> Self {
        Self::build(&GeneratorConfig::default())
    }

    /// Empty service configured by `config`
    ///
    /// With a fixed seed, each sub-service gets its own derived seed so that
    /// the three generate independent but reproducible data.
    pub fn with_config(config: &MockConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(&config.generator))
    }

    fn build(generator: &GeneratorConfig) -> Self {
        let generator_for = |offset: u64| {
            PolicyGenerator::from_config(GeneratorConfig {
                seed: generator.seed.map(|s| s.wrapping_add(offset)),
                ..generator.clone()
            })
        };

        info!(
            "Creating mock resource manager service (seed: {:?})",
            generator.seed
        );
        MockService {
            organizations: ResourceService::with_generator(generator_for(0)),
            folders: ResourceService::with_generator(generator_for(1)),
            projects: ResourceService::with_generator(generator_for(2)),
        }
    }

    /// Add every resource in `fixture`
    ///
    /// # Errors
    ///
    /// `AlreadyExists` on the first duplicate name; resources loaded before
    /// it stay in place.
    pub fn load_fixture(&mut self, fixture: Fixture) -> Result<()> {
        info!(
            "Loading fixture: {} organizations, {} folders, {} projects",
            fixture.organizations.len(),
            fixture.folders.len(),
            fixture.projects.len()
        );
        load_into(&mut self.organizations, fixture.organizations)?;
        load_into(&mut self.folders, fixture.folders)?;
        load_into(&mut self.projects, fixture.projects)?;
        Ok(())
    }

    /// Snapshot of all resources
    pub fn to_fixture(&self) -> Fixture {
        Fixture {
            organizations: self.organizations.list().to_vec(),
            folders: self.folders.list().to_vec(),
            projects: self.projects.list().to_vec(),
        }
    }

    /// Total number of resources across all kinds
    pub fn len(&self) -> usize {
        self.organizations.len() + self.folders.len() + self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

fn load_into<R: Resource>(service: &mut ResourceService<R>, resources: Vec<R>) -> Result<()> {
    for resource in resources {
        service.insert(resource)?;
    }
    Ok(())
}
