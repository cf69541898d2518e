//! IAM Policy document structure
//!
//! Policies bind roles to lists of members. The shape mirrors the Cloud
//! Resource Manager v3 `Policy`/`Binding` schema so fixtures can be written
//! in the same JSON the real API returns.

use crate::error::{MockError, Result};
use serde::{Deserialize, Serialize};

/// A role granted to a list of members
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Binding {
    /// Role name, e.g. `roles/viewer`
    pub role: String,

    /// Member identifiers, e.g. `user:alice@example.com`
    #[serde(default)]
    pub members: Vec<String>,
}

impl Binding {
    /// Create a binding for `role`, copying the given members
    pub fn new<R, I, M>(role: R, members: I) -> Self
    where
        R: Into<String>,
        I: IntoIterator<Item = M>,
        M: Into<String>,
    {
        Binding {
            role: role.into(),
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    /// Check if `member` is granted this binding's role
    pub fn has_member(&self, member: &str) -> bool {
        self.members.iter().any(|m| m == member)
    }
}

/// Complete IAM policy attached to a resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    /// Policy format version (stored verbatim)
    #[serde(default, skip_serializing_if = "is_zero")]
    pub version: i32,

    /// Role bindings, in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bindings: Vec<Binding>,

    /// Concurrency token (stored verbatim, never checked)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
}

fn is_zero(v: &i32) -> bool {
    *v == 0
}

impl Policy {
    /// Create a policy with the given bindings
    pub fn new(bindings: Vec<Binding>) -> Self {
        Policy {
            bindings,
            ..Default::default()
        }
    }

    /// Create a policy with no bindings
    pub fn empty() -> Self {
        Self::default()
    }

    /// Append bindings and return the full binding list
    pub fn add_bindings<I>(&mut self, bindings: I) -> &[Binding]
    where
        I: IntoIterator<Item = Binding>,
    {
        self.bindings.extend(bindings);
        &self.bindings
    }

    /// First binding for `role`, if any
    pub fn binding_for_role(&self, role: &str) -> Option<&Binding> {
        self.bindings.iter().find(|b| b.role == role)
    }

    /// Members of the first binding for `role`
    ///
    /// # Errors
    ///
    /// Returns `BindingNotFound` if no binding carries the role.
    pub fn role_members(&self, role: &str) -> Result<&[String]> {
        self.binding_for_role(role)
            .map(|b| b.members.as_slice())
            .ok_or_else(|| MockError::BindingNotFound(role.to_string()))
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Parse policy from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize policy to JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Options accepted by `getIamPolicy`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPolicyOptions {
    #[serde(default)]
    pub requested_policy_version: i32,
}

/// Request body for `getIamPolicy`. Accepted for signature parity; the mock
/// ignores its contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetIamPolicyRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<GetPolicyOptions>,
}

impl GetIamPolicyRequest {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Request body for `setIamPolicy`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetIamPolicyRequest {
    /// Policy that replaces the resource's current policy
    #[serde(default)]
    pub policy: Policy,
}

impl SetIamPolicyRequest {
    pub fn new(policy: Policy) -> Self {
        SetIamPolicyRequest { policy }
    }
}
