//! Error types for the ORM system
//!
//! Provides error handling for association declaration, attribute access,
//! and record validation.

use std::fmt;

use oneof_validation::ValidationErrors;

/// Result type alias for model operations
pub type ModelResult<T> = Result<T, ModelError>;

/// Error types for ORM operations
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Association or field declaration is malformed
    Configuration(String),
    /// A value was assigned to an association that cannot hold its type
    TypeMismatch(String),
    /// The record has no column with this name
    MissingAttribute(String),
    /// Primary key is missing or invalid
    InvalidKey(String),
    /// Association lookup failed
    Relationship(String),
    /// Serialization/deserialization error
    Serialization(String),
    /// Record validation failed
    Validation(ValidationErrors),
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            ModelError::TypeMismatch(msg) => write!(f, "Association type mismatch: {}", msg),
            ModelError::MissingAttribute(column) => write!(f, "Missing attribute '{}'", column),
            ModelError::InvalidKey(msg) => write!(f, "Invalid key error: {}", msg),
            ModelError::Relationship(msg) => write!(f, "Relationship error: {}", msg),
            ModelError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            ModelError::Validation(errors) => write!(f, "{}", errors),
        }
    }
}

impl std::error::Error for ModelError {}

impl From<ValidationErrors> for ModelError {
    fn from(errors: ValidationErrors) -> Self {
        ModelError::Validation(errors)
    }
}

// Convert from serde_json errors
impl From<serde_json::Error> for ModelError {
    fn from(err: serde_json::Error) -> Self {
        ModelError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for ModelError {
    fn from(err: serde_yaml::Error) -> Self {
        ModelError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for ModelError {
    fn from(err: std::io::Error) -> Self {
        ModelError::Configuration(err.to_string())
    }
}
