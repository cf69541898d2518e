//! Loading services from TOML config and JSON fixture files

use mockgcp::{Fixture, GetIamPolicyRequest, MockError, MockServiceBuilder, Resource};
use std::io::Write;
use tempfile::NamedTempFile;

const HIERARCHY: &str = r#"{
    "organizations": [
        {
            "organizationId": "organizations/100",
            "domain": "example.com",
            "policy": {
                "bindings": [
                    {"role": "roles/resourcemanager.organizationAdmin", "members": ["user:root@example.com"]}
                ]
            }
        }
    ],
    "folders": [
        {"folderId": "folders/200", "displayName": "Engineering"},
        {"folderId": "folders/201", "displayName": "Finance"}
    ],
    "projects": [
        {"projectId": "projects/api", "displayName": "Engineering"},
        {"projectId": "projects/web", "displayName": "Engineering"},
        {"projectId": "projects/ledger", "displayName": "Finance"}
    ]
}"#;

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_build_from_files() {
    let config = write_temp(
        r#"
        [generator]
        seed = 1
        min_bindings = 2
        max_bindings = 2
        member_domain = "fixtures.test"
        "#,
    );
    let fixture = write_temp(HIERARCHY);

    let mut client = MockServiceBuilder::new()
        .config_file(config.path())
        .unwrap()
        .fixture_file(fixture.path())
        .unwrap()
        .build_client()
        .unwrap();

    assert_eq!(client.service.len(), 6);

    let org_policy = client
        .service
        .organizations
        .get_iam_policy("organizations/100", GetIamPolicyRequest::new())
        .execute()
        .unwrap();
    assert_eq!(
        org_policy
            .role_members("roles/resourcemanager.organizationAdmin")
            .unwrap(),
        ["user:root@example.com".to_string()]
    );

    // Generation after loading follows the configured ranges
    let generated = client.service.projects.generate_projects(3, "extra").to_vec();
    for project in &generated {
        assert_eq!(project.policy.bindings.len(), 2);
        assert!(project.policy.bindings[0].members[0].ends_with("@fixtures.test"));
    }
    assert_eq!(client.service.projects.len(), 6);
}

#[test]
fn test_search_loaded_hierarchy() {
    let client = MockServiceBuilder::new()
        .fixture(Fixture::from_json(HIERARCHY).unwrap())
        .build_client()
        .unwrap();

    let response = client
        .projects_search()
        .query("displayName=Engineering")
        .execute()
        .unwrap();
    let names: Vec<&str> = response.resources.iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["projects/api", "projects/web"]);

    let folders = client
        .service
        .folders
        .search()
        .query("displayName=Finance")
        .execute()
        .unwrap();
    assert_eq!(folders.resources[0].folder_id, "folders/201");

    let orgs = client
        .service
        .organizations
        .search()
        .query("domain=example.com")
        .execute()
        .unwrap();
    assert_eq!(orgs.resources.len(), 1);

    let err = client
        .projects_search()
        .query("domain=example.com")
        .execute()
        .unwrap_err();
    assert!(matches!(err, MockError::InvalidQuery(_)));
}

#[test]
fn test_fixture_dump_reloads() {
    let mut service = MockServiceBuilder::new().seed(10).build().unwrap();
    service.organizations.generate_organizations(2, "org");
    service.folders.generate_folders(2, "folder");
    service.projects.generate_projects(2, "project");

    let dumped = write_temp(&service.to_fixture().to_json().unwrap());

    let reloaded = MockServiceBuilder::new()
        .fixture_file(dumped.path())
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(reloaded.to_fixture(), service.to_fixture());
}

#[test]
fn test_bad_fixture_json() {
    let file = write_temp("{ not json");
    let result = MockServiceBuilder::new().fixture_file(file.path());
    assert!(matches!(result, Err(MockError::Serialization(_))));
}
