//! Configuration for mock services
//!
//! Controls how fixture data is generated. Loaded from TOML:
//!
//! ```toml
//! [generator]
//! seed = 42
//! min_bindings = 10
//! max_bindings = 19
//! min_members = 1
//! max_members = 10
//! member_domain = "testdomain.co"
//! ```

use crate::error::{MockError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings for random policy generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Fixed RNG seed. `None` seeds from OS entropy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Fewest bindings in a generated policy
    pub min_bindings: usize,

    /// Most bindings in a generated policy (inclusive)
    pub max_bindings: usize,

    /// Fewest members in a generated binding
    pub min_members: usize,

    /// Most members in a generated binding (inclusive)
    pub max_members: usize,

    /// Domain appended to generated member addresses
    pub member_domain: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            seed: None,
            min_bindings: 10,
            max_bindings: 19,
            min_members: 1,
            max_members: 10,
            member_domain: "testdomain.co".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Check range bounds and the member domain
    pub fn validate(&self) -> Result<()> {
        if self.min_bindings > self.max_bindings {
            return Err(MockError::InvalidConfig(format!(
                "min_bindings ({}) exceeds max_bindings ({})",
                self.min_bindings, self.max_bindings
            )));
        }
        if self.min_members == 0 {
            return Err(MockError::InvalidConfig(
                "bindings must have at least one member".to_string(),
            ));
        }
        if self.min_members > self.max_members {
            return Err(MockError::InvalidConfig(format!(
                "min_members ({}) exceeds max_members ({})",
                self.min_members, self.max_members
            )));
        }
        if self.member_domain.trim().is_empty() {
            return Err(MockError::InvalidConfig(
                "member_domain cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Top-level mock configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MockConfig {
    pub generator: GeneratorConfig,
}

impl MockConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: MockConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        self.generator.validate()
    }

    /// Copy of this config with a fixed generator seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.generator.seed = Some(seed);
        self
    }
}
