//! Error types for mock resource manager operations

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MockError {
    /// No resource with this identifier exists in the service
    #[error("resource not found: {0}")]
    ResourceNotFound(String),

    /// Identifier does not carry the `<kind>/` prefix of the service it was sent to
    #[error("resource format invalid: {0}")]
    ResourceFormatInvalid(String),

    /// A resource with this identifier was already registered
    #[error("resource already exists: {0}")]
    AlreadyExists(String),

    #[error("binding not found: {0}")]
    BindingNotFound(String),

    #[error("{0}")]
    InvalidQuery(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MockError {
    /// True for the "resource not found" family of errors
    pub fn is_not_found(&self) -> bool {
        matches!(self, MockError::ResourceNotFound(_))
    }

    /// True when the identifier failed the kind prefix check
    pub fn is_format_invalid(&self) -> bool {
        matches!(self, MockError::ResourceFormatInvalid(_))
    }
}

pub type Result<T> = std::result::Result<T, MockError>;
