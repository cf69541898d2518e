//! Get/Set policy call objects
//!
//! Services hand out a call object per request; `execute` performs the
//! lookup or mutation exactly once, consuming the call.

use super::resources::ResourceService;
use crate::error::{MockError, Result};
use crate::iam::{GetIamPolicyRequest, Policy, SetIamPolicyRequest};
use crate::resource::{Folder, Organization, Project, Resource};
use crate::validation::ResourceName;
use tracing::{debug, warn};

/// A pending policy call that yields a `Policy` when executed
///
/// Object safe, so facades can return `Box<dyn PolicyCall>` regardless of
/// resource kind.
pub trait PolicyCall {
    /// Run the call
    fn execute(self: Box<Self>) -> Result<Policy>;
}

/// Pending `getIamPolicy` against one service
#[derive(Debug)]
pub struct GetIamPolicyCall<'a, R: Resource> {
    service: &'a ResourceService<R>,
    resource: String,
    request: GetIamPolicyRequest,
}

impl<'a, R: Resource> GetIamPolicyCall<'a, R> {
    pub(crate) fn new(
        service: &'a ResourceService<R>,
        resource: String,
        request: GetIamPolicyRequest,
    ) -> Self {
        GetIamPolicyCall {
            service,
            resource,
            request,
        }
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn request(&self) -> &GetIamPolicyRequest {
        &self.request
    }

    /// Return a copy of the resource's policy
    ///
    /// # Errors
    ///
    /// `ResourceNotFound` if no resource has this name.
    pub fn execute(self) -> Result<Policy> {
        debug!("getIamPolicy {} '{}'", R::KIND, self.resource);
        match self.service.get(&self.resource) {
            Some(resource) => Ok(resource.policy().clone()),
            None => Err(MockError::ResourceNotFound(self.resource)),
        }
    }
}

impl<R: Resource> PolicyCall for GetIamPolicyCall<'_, R> {
    fn execute(self: Box<Self>) -> Result<Policy> {
        (*self).execute()
    }
}

/// Pending `setIamPolicy` against one service
#[derive(Debug)]
pub struct SetIamPolicyCall<'a, R: Resource> {
    service: &'a mut ResourceService<R>,
    resource: String,
    request: SetIamPolicyRequest,
}

impl<'a, R: Resource> SetIamPolicyCall<'a, R> {
    pub(crate) fn new(
        service: &'a mut ResourceService<R>,
        resource: String,
        request: SetIamPolicyRequest,
    ) -> Self {
        SetIamPolicyCall {
            service,
            resource,
            request,
        }
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn request(&self) -> &SetIamPolicyRequest {
        &self.request
    }

    /// Replace the resource's policy and return a copy of the new one
    ///
    /// # Errors
    ///
    /// - `ResourceFormatInvalid` if the name lacks this kind's collection
    ///   prefix. Checked before lookup.
    /// - `ResourceNotFound` if no resource has this name.
    pub fn execute(self) -> Result<Policy> {
        let SetIamPolicyCall {
            service,
            resource,
            request,
        } = self;

        if let Err(e) = ResourceName::new(R::KIND, resource.as_str()) {
            warn!("setIamPolicy rejected {} name '{}'", R::KIND, resource);
            return Err(e);
        }

        debug!(
            "setIamPolicy {} '{}' ({} bindings)",
            R::KIND,
            resource,
            request.policy.bindings.len()
        );
        match service.get_mut(&resource) {
            Some(target) => {
                *target.policy_mut() = request.policy.clone();
                Ok(request.policy)
            }
            None => Err(MockError::ResourceNotFound(resource)),
        }
    }
}

impl<R: Resource> PolicyCall for SetIamPolicyCall<'_, R> {
    fn execute(self: Box<Self>) -> Result<Policy> {
        (*self).execute()
    }
}

pub type OrganizationsGetIamPolicyCall<'a> = GetIamPolicyCall<'a, Organization>;
pub type OrganizationsSetIamPolicyCall<'a> = SetIamPolicyCall<'a, Organization>;
pub type FoldersGetIamPolicyCall<'a> = GetIamPolicyCall<'a, Folder>;
pub type FoldersSetIamPolicyCall<'a> = SetIamPolicyCall<'a, Folder>;
pub type ProjectsGetIamPolicyCall<'a> = GetIamPolicyCall<'a, Project>;
pub type ProjectsSetIamPolicyCall<'a> = SetIamPolicyCall<'a, Project>;
