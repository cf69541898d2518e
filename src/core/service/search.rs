//! Attribute search over a resource service
//!
//! Queries have the form `<field>=<value>` where `field` is `displayName` for
//! folders and projects and `domain` for organizations. Matching is exact.

use super::resources::ResourceService;
use crate::error::{MockError, Result};
use crate::resource::{Folder, Organization, Project, Resource};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Resources matched by a search, in list order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "R: Resource")]
pub struct SearchResponse<R: Resource> {
    pub resources: Vec<R>,
}

pub type SearchOrganizationsResponse = SearchResponse<Organization>;
pub type SearchFoldersResponse = SearchResponse<Folder>;
pub type SearchProjectsResponse = SearchResponse<Project>;

/// Pending search against one service
#[derive(Debug)]
pub struct SearchCall<'a, R: Resource> {
    service: &'a ResourceService<R>,
    query: String,
}

pub type OrganizationsSearchCall<'a> = SearchCall<'a, Organization>;
pub type FoldersSearchCall<'a> = SearchCall<'a, Folder>;
pub type ProjectsSearchCall<'a> = SearchCall<'a, Project>;

impl<'a, R: Resource> SearchCall<'a, R> {
    pub(crate) fn new(service: &'a ResourceService<R>) -> Self {
        SearchCall {
            service,
            query: String::new(),
        }
    }

    /// Set the `<field>=<value>` filter
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Run the search
    ///
    /// # Errors
    ///
    /// `InvalidQuery` unless the query is exactly one `=` with this kind's
    /// search field on the left.
    pub fn execute(self) -> Result<SearchResponse<R>> {
        let parts: Vec<&str> = self.query.split('=').collect();
        let value = match parts.as_slice() {
            [field, value] if *field == R::KIND.search_field() => *value,
            _ => {
                return Err(MockError::InvalidQuery(format!(
                    "invalid {} query",
                    R::KIND
                )))
            }
        };

        let resources: Vec<R> = self
            .service
            .list()
            .iter()
            .filter(|r| r.search_attribute() == value)
            .cloned()
            .collect();

        debug!(
            "search {} '{}' matched {}",
            R::KIND,
            self.query,
            resources.len()
        );
        Ok(SearchResponse { resources })
    }
}
