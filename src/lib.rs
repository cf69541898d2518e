//! # mockgcp - In-Memory Cloud Resource Manager IAM Mock
//!
//! `mockgcp` is a test double for the Cloud Resource Manager IAM policy API.
//! Code that reads and writes policies on organizations, folders and projects
//! can be exercised in unit tests without network calls or credentials.
//!
//! - **Per-kind services** for organizations, folders and projects
//! - **Get/Set IAM policy calls** with copy-on-read/write semantics
//! - **Resource name validation** (`projects/...`, `folders/...`, `organizations/...`)
//! - **Seedable fixture generation** for roles, members, bindings and policies
//! - **JSON fixtures** and **TOML configuration**
//!
//! ## Quick Start
//!
//! ```rust
//! use mockgcp::{MockService, PolicyGenerator, GetIamPolicyRequest, SetIamPolicyRequest, Result};
//!
//! # fn main() -> Result<()> {
//! let mut service = MockService::new();
//! service.projects.new_project("projects/TestProject", "Test Project", None)?;
//!
//! let policy = PolicyGenerator::seeded(1).policy();
//! service
//!     .projects
//!     .set_iam_policy("projects/TestProject", SetIamPolicyRequest::new(policy.clone()))
//!     .execute()?;
//!
//! let got = service
//!     .projects
//!     .get_iam_policy("projects/TestProject", GetIamPolicyRequest::new())
//!     .execute()?;
//! assert_eq!(got, policy);
//! # Ok(())
//! # }
//! ```
//!
//! ## Builder
//!
//! ```rust
//! use mockgcp::{MockServiceBuilder, Result};
//!
//! # fn main() -> Result<()> {
//! let mut service = MockServiceBuilder::new()
//!     .seed(42)
//!     .member_domain("example.org")
//!     .build()?;
//!
//! let generated = service.projects.generate_projects(3, "team");
//! assert_eq!(generated.len(), 3);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod core;

// Short crate:: paths for the core modules
#[allow(unused_imports)]
pub(crate) use crate::core::{config, error, iam, resource, service, validation};

pub use crate::client::{GcpClient, ResourceManagerClient};
pub use crate::core::{
    config::{GeneratorConfig, MockConfig},
    error::{MockError, Result},
    iam::{Binding, GetIamPolicyRequest, GetPolicyOptions, Policy, PolicyGenerator, SetIamPolicyRequest},
    resource::{Folder, Organization, Project, Resource, ResourceKind},
    service::{
        Fixture, FoldersService, MockService, OrganizationsService, PolicyCall, ProjectsService,
        ResourceService, SearchResponse,
    },
    validation::ResourceName,
};

use std::path::Path;
use tracing::debug;

/// Builder for customizing a `MockService`
///
/// # Examples
///
/// ```rust,no_run
/// use mockgcp::MockServiceBuilder;
///
/// # fn main() -> mockgcp::Result<()> {
/// let client = MockServiceBuilder::new()
///     .config_file("mockgcp.toml")?
///     .fixture_file("fixtures/hierarchy.json")?
///     .build_client()?;
/// # Ok(())
/// # }
/// ```
pub struct MockServiceBuilder {
    config: MockConfig,
    fixtures: Vec<Fixture>,
}

impl MockServiceBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        MockServiceBuilder {
            config: MockConfig::default(),
            fixtures: Vec::new(),
        }
    }

    /// Replace the whole configuration
    pub fn config(mut self, config: MockConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a TOML file
    pub fn config_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        debug!("Loading mock config from {:?}", path.as_ref());
        self.config = MockConfig::from_file(path)?;
        Ok(self)
    }

    /// Fix the generator seed for reproducible fixtures
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.generator.seed = Some(seed);
        self
    }

    /// Set the domain used for generated member addresses
    pub fn member_domain<S: Into<String>>(mut self, domain: S) -> Self {
        self.config.generator.member_domain = domain.into();
        self
    }

    /// Preload resources from a fixture
    pub fn fixture(mut self, fixture: Fixture) -> Self {
        self.fixtures.push(fixture);
        self
    }

    /// Preload resources from a JSON fixture file
    pub fn fixture_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        debug!("Loading fixture from {:?}", path.as_ref());
        self.fixtures.push(Fixture::from_file(path)?);
        Ok(self)
    }

    /// Build the service
    pub fn build(self) -> Result<MockService> {
        let mut service = MockService::with_config(&self.config)?;
        for fixture in self.fixtures {
            service.load_fixture(fixture)?;
        }
        Ok(service)
    }

    /// Build the service and wrap it in a `GcpClient`
    pub fn build_client(self) -> Result<GcpClient> {
        Ok(GcpClient::from_service(self.build()?))
    }
}

impl Default for MockServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}
