//! Client facade over `MockService`
//!
//! The real client exposes policy methods on its sub-services
//! (`projects.setIamPolicy`, `folders.getIamPolicy`, ...). Code under test
//! usually wants one flat interface it can swap between the real client and
//! this mock; `ResourceManagerClient` is that interface and `GcpClient`
//! implements it on top of the mock service.

use crate::core::iam::{GetIamPolicyRequest, SetIamPolicyRequest};
use crate::core::service::{MockService, PolicyCall, ProjectsSearchCall};

/// Flat policy interface over the three resource kinds
///
/// Every method returns a pending call; `execute` runs it.
pub trait ResourceManagerClient {
    fn project_get_iam_policy(
        &self,
        resource: &str,
        request: GetIamPolicyRequest,
    ) -> Box<dyn PolicyCall + '_>;

    fn project_set_iam_policy(
        &mut self,
        resource: &str,
        request: SetIamPolicyRequest,
    ) -> Box<dyn PolicyCall + '_>;

    fn folder_get_iam_policy(
        &self,
        resource: &str,
        request: GetIamPolicyRequest,
    ) -> Box<dyn PolicyCall + '_>;

    fn folder_set_iam_policy(
        &mut self,
        resource: &str,
        request: SetIamPolicyRequest,
    ) -> Box<dyn PolicyCall + '_>;

    fn organization_get_iam_policy(
        &self,
        resource: &str,
        request: GetIamPolicyRequest,
    ) -> Box<dyn PolicyCall + '_>;

    fn organization_set_iam_policy(
        &mut self,
        resource: &str,
        request: SetIamPolicyRequest,
    ) -> Box<dyn PolicyCall + '_>;
}

/// Mock client wrapping a `MockService`
///
/// # Examples
///
/// ```
/// use mockgcp::{GcpClient, GetIamPolicyRequest, ResourceManagerClient};
///
/// let mut client = GcpClient::new();
/// client
///     .service
///     .projects
///     .new_project("projects/demo", "Demo", None)
///     .unwrap();
///
/// let policy = client
///     .project_get_iam_policy("projects/demo", GetIamPolicyRequest::new())
///     .execute()
///     .unwrap();
/// assert!(policy.bindings.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct GcpClient {
    pub service: MockService,
}

impl GcpClient {
    /// Client over an empty, entropy-seeded service
    pub fn new() -> Self {
        Self::from_service(MockService::new())
    }

    pub fn from_service(service: MockService) -> Self {
        GcpClient { service }
    }

    /// Search projects by display name
    pub fn projects_search(&self) -> ProjectsSearchCall<'_> {
        self.service.projects.search()
    }

    pub fn into_service(self) -> MockService {
        self.service
    }
}

impl ResourceManagerClient for GcpClient {
    fn project_get_iam_policy(
        &self,
        resource: &str,
        request: GetIamPolicyRequest,
    ) -> Box<dyn PolicyCall + '_> {
        Box::new(self.service.projects.get_iam_policy(resource, request))
    }

    fn project_set_iam_policy(
        &mut self,
        resource: &str,
        request: SetIamPolicyRequest,
    ) -> Box<dyn PolicyCall + '_> {
        Box::new(self.service.projects.set_iam_policy(resource, request))
    }

    fn folder_get_iam_policy(
        &self,
        resource: &str,
        request: GetIamPolicyRequest,
    ) -> Box<dyn PolicyCall + '_> {
        Box::new(self.service.folders.get_iam_policy(resource, request))
    }

    fn folder_set_iam_policy(
        &mut self,
        resource: &str,
        request: SetIamPolicyRequest,
    ) -> Box<dyn PolicyCall + '_> {
        Box::new(self.service.folders.set_iam_policy(resource, request))
    }

    fn organization_get_iam_policy(
        &self,
        resource: &str,
        request: GetIamPolicyRequest,
    ) -> Box<dyn PolicyCall + '_> {
        Box::new(self.service.organizations.get_iam_policy(resource, request))
    }

    fn organization_set_iam_policy(
        &mut self,
        resource: &str,
        request: SetIamPolicyRequest,
    ) -> Box<dyn PolicyCall + '_> {
        Box::new(self.service.organizations.set_iam_policy(resource, request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::MockError;
    use crate::core::iam::{Binding, Policy};

    fn grant(client: &mut impl ResourceManagerClient, project: &str, member: &str) -> crate::Result<Policy> {
        let mut policy = client
            .project_get_iam_policy(project, GetIamPolicyRequest::new())
            .execute()?;
        policy.add_bindings(vec![Binding::new("roles/viewer", [member])]);
        client
            .project_set_iam_policy(project, SetIamPolicyRequest::new(policy))
            .execute()
    }

    #[test]
    fn test_generic_caller() {
        let mut client = GcpClient::new();
        client
            .service
            .projects
            .new_project("projects/app", "App", None)
            .unwrap();

        let policy = grant(&mut client, "projects/app", "user:dev@example.com").unwrap();
        assert!(policy
            .binding_for_role("roles/viewer")
            .unwrap()
            .has_member("user:dev@example.com"));

        let err = grant(&mut client, "projects/missing", "user:dev@example.com").unwrap_err();
        assert!(matches!(err, MockError::ResourceNotFound(_)));
    }

    #[test]
    fn test_wrappers_route_to_their_kind() {
        let mut client = GcpClient::new();
        client
            .service
            .folders
            .new_folder("folders/1", "F", None)
            .unwrap();
        client
            .service
            .organizations
            .new_organization("organizations/1", "example.com", None)
            .unwrap();

        let policy = Policy::new(vec![Binding::new("roles/browser", ["group:all@example.com"])]);

        client
            .folder_set_iam_policy("folders/1", SetIamPolicyRequest::new(policy.clone()))
            .execute()
            .unwrap();
        assert_eq!(
            client
                .folder_get_iam_policy("folders/1", GetIamPolicyRequest::new())
                .execute()
                .unwrap(),
            policy
        );

        // Organization untouched
        assert!(client
            .organization_get_iam_policy("organizations/1", GetIamPolicyRequest::new())
            .execute()
            .unwrap()
            .is_empty());

        let err = client
            .organization_set_iam_policy("folders/1", SetIamPolicyRequest::new(policy))
            .execute()
            .unwrap_err();
        assert!(err.is_format_invalid());
    }

    #[test]
    fn test_projects_search() {
        let mut client = GcpClient::new();
        client
            .service
            .projects
            .new_project("projects/one", "shared", None)
            .unwrap();

        let response = client
            .projects_search()
            .query("displayName=shared")
            .execute()
            .unwrap();
        assert_eq!(response.resources[0].project_id, "projects/one");
    }
}
