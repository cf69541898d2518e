//! Validation for resource names
//!
//! Resource names take the form `<collection>/<id>`, e.g. `projects/my-project`
//! or `organizations/1234`. A Set call is only accepted when the name carries
//! the collection prefix of the service it was sent to.

use crate::error::{MockError, Result};
use crate::resource::ResourceKind;
use regex::Regex;

/// A resource name checked against its kind's collection prefix
///
/// # Examples
///
/// Valid names for `ResourceKind::Project`:
/// - "projects/TestProject"
/// - "projects/test-123"
///
/// Invalid names:
/// - "TestProject" (no prefix)
/// - "folders/123" (wrong collection)
/// - "my/projects/x" (prefix not at the start)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceName {
    kind: ResourceKind,
    name: String,
}

impl ResourceName {
    /// Validate `name` as a resource of `kind`
    ///
    /// # Errors
    ///
    /// Returns `ResourceFormatInvalid` if the name does not start with
    /// `<collection>/`.
    ///
    /// # Examples
    ///
    /// ```
    /// use mockgcp::{ResourceKind, ResourceName};
    ///
    /// let name = ResourceName::new(ResourceKind::Project, "projects/TestProject").unwrap();
    /// assert_eq!(name.id(), "TestProject");
    ///
    /// assert!(ResourceName::new(ResourceKind::Project, "TestProject").is_err());
    /// assert!(ResourceName::new(ResourceKind::Folder, "projects/TestProject").is_err());
    /// ```
    pub fn new(kind: ResourceKind, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        Self::validate(kind, &name)?;
        Ok(ResourceName { kind, name })
    }

    /// Detect the kind from the name's collection prefix
    pub fn parse(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        match ResourceKind::ALL
            .iter()
            .copied()
            .find(|kind| Self::matches(*kind, &name).unwrap_or(false))
        {
            Some(kind) => Ok(ResourceName { kind, name }),
            None => Err(MockError::ResourceFormatInvalid(name)),
        }
    }

    fn pattern(kind: ResourceKind) -> String {
        format!("^{}/.*", regex::escape(kind.collection()))
    }

    fn matches(kind: ResourceKind, name: &str) -> Result<bool> {
        let re = Regex::new(&Self::pattern(kind))?;
        Ok(re.is_match(name))
    }

    fn validate(kind: ResourceKind, name: &str) -> Result<()> {
        if !Self::matches(kind, name)? {
            return Err(MockError::ResourceFormatInvalid(name.to_string()));
        }
        Ok(())
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// The full name, including the collection prefix
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// The part after `<collection>/`
    pub fn id(&self) -> &str {
        &self.name[self.kind.collection().len() + 1..]
    }

    pub fn into_string(self) -> String {
        self.name
    }
}

impl AsRef<str> for ResourceName {
    fn as_ref(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for ResourceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
