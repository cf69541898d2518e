//! Resources in the mocked hierarchy
//!
//! Organizations, folders and projects share one shape: an identifier of the
//! form `<collection>/<id>`, one display attribute, and a policy.

use crate::iam::Policy;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of resource in the hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Organization,
    Folder,
    Project,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [
        ResourceKind::Organization,
        ResourceKind::Folder,
        ResourceKind::Project,
    ];

    /// Collection prefix used in resource names
    pub fn collection(&self) -> &'static str {
        match self {
            ResourceKind::Organization => "organizations",
            ResourceKind::Folder => "folders",
            ResourceKind::Project => "projects",
        }
    }

    /// Attribute name accepted by search queries (`<field>=<value>`)
    pub fn search_field(&self) -> &'static str {
        match self {
            ResourceKind::Organization => "domain",
            ResourceKind::Folder | ResourceKind::Project => "displayName",
        }
    }

    /// Build a full resource name from a bare id
    pub fn name_for(&self, id: &str) -> String {
        format!("{}/{}", self.collection(), id)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ResourceKind::Organization => "organization",
            ResourceKind::Folder => "folder",
            ResourceKind::Project => "project",
        };
        f.write_str(s)
    }
}

/// Common interface of the three resource types
///
/// The services are generic over this trait so that lookups, policy
/// replacement and search are written once.
pub trait Resource: Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned {
    const KIND: ResourceKind;

    /// Construct a resource from its name, display attribute and policy
    fn build(name: String, attribute: String, policy: Policy) -> Self;

    /// Full resource name, e.g. `projects/my-project`
    fn name(&self) -> &str;

    /// The attribute matched by search queries
    fn search_attribute(&self) -> &str;

    fn policy(&self) -> &Policy;

    fn policy_mut(&mut self) -> &mut Policy;
}

/// A mock organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub organization_id: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub policy: Policy,
}

/// A mock folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub folder_id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub policy: Policy,
}

/// A mock project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub project_id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub policy: Policy,
}

impl Resource for Organization {
    const KIND: ResourceKind = ResourceKind::Organization;

    fn build(name: String, domain: String, policy: Policy) -> Self {
        Organization {
            organization_id: name,
            domain,
            policy,
        }
    }

    fn name(&self) -> &str {
        &self.organization_id
    }

    fn search_attribute(&self) -> &str {
        &self.domain
    }

    fn policy(&self) -> &Policy {
        &self.policy
    }

    fn policy_mut(&mut self) -> &mut Policy {
        &mut self.policy
    }
}

impl Resource for Folder {
    const KIND: ResourceKind = ResourceKind::Folder;

    fn build(name: String, display_name: String, policy: Policy) -> Self {
        Folder {
            folder_id: name,
            display_name,
            policy,
        }
    }

    fn name(&self) -> &str {
        &self.folder_id
    }

    fn search_attribute(&self) -> &str {
        &self.display_name
    }

    fn policy(&self) -> &Policy {
        &self.policy
    }

    fn policy_mut(&mut self) -> &mut Policy {
        &mut self.policy
    }
}

impl Resource for Project {
    const KIND: ResourceKind = ResourceKind::Project;

    fn build(name: String, display_name: String, policy: Policy) -> Self {
        Project {
            project_id: name,
            display_name,
            policy,
        }
    }

    fn name(&self) -> &str {
        &self.project_id
    }

    fn search_attribute(&self) -> &str {
        &self.display_name
    }

    fn policy(&self) -> &Policy {
        &self.policy
    }

    fn policy_mut(&mut self) -> &mut Policy {
        &mut self.policy
    }
}
