//! Validation error types and handling

use std::collections::HashMap;
use std::fmt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type ValidationResult<T> = Result<T, ValidationErrors>;

/// Field key used for errors attached to the record as a whole
pub const BASE: &str = "base";

/// Individual validation error for a specific field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationError {
    /// The field that failed validation (`base` for record-level errors)
    pub field: String,
    /// Human-readable error message
    pub message: String,
    /// Error code for programmatic handling
    pub code: String,
    /// Additional context or hints
    pub context: Option<serde_json::Value>,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: "validation_failed".to_string(),
            context: None,
        }
    }

    /// Create a record-level validation error
    pub fn base(message: impl Into<String>) -> Self {
        Self::new(BASE, message)
    }

    /// Create a validation error with a specific code
    pub fn with_code(field: impl Into<String>, message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: code.into(),
            context: None,
        }
    }

    /// Set the error code
    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Set additional context
    pub fn context(mut self, context: serde_json::Value) -> Self {
        self.context = Some(context);
        self
    }

    /// Whether this error is attached to the record rather than a field
    pub fn is_base(&self) -> bool {
        self.field == BASE
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Collection of validation errors, grouped by field
#[derive(Debug, Clone, Serialize, Deserialize, Error, PartialEq)]
pub struct ValidationErrors {
    /// Map of field names to their validation errors
    pub errors: HashMap<String, Vec<ValidationError>>,
}

impl ValidationErrors {
    /// Create a new empty validation errors collection
    pub fn new() -> Self {
        Self {
            errors: HashMap::new(),
        }
    }

    /// Add a single validation error
    pub fn add(&mut self, error: ValidationError) {
        self.errors
            .entry(error.field.clone())
            .or_default()
            .push(error);
    }

    /// Add a simple validation error with field and message
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let error = ValidationError::new(field.into(), message);
        self.add(error);
    }

    /// Add a record-level error
    pub fn add_base_error(&mut self, message: impl Into<String>) {
        self.add(ValidationError::base(message));
    }

    /// Check if there are any validation errors
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get the number of fields with errors
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Get total number of validation errors across all fields
    pub fn total_errors(&self) -> usize {
        self.errors.values().map(|v| v.len()).sum()
    }

    /// Get errors for a specific field
    pub fn get_field_errors(&self, field: &str) -> Option<&Vec<ValidationError>> {
        self.errors.get(field)
    }

    /// Check if a specific field has errors
    pub fn has_field_errors(&self, field: &str) -> bool {
        self.errors.get(field).is_some_and(|errors| !errors.is_empty())
    }

    /// Messages attached to a field, in the order they were added
    pub fn messages(&self, field: &str) -> Vec<&str> {
        self.errors
            .get(field)
            .map(|errors| errors.iter().map(|e| e.message.as_str()).collect())
            .unwrap_or_default()
    }

    /// Messages attached to the record as a whole
    pub fn base_messages(&self) -> Vec<&str> {
        self.messages(BASE)
    }

    /// Whether `message` is among the messages attached to `field`
    pub fn includes(&self, field: &str, message: &str) -> bool {
        self.messages(field).contains(&message)
    }

    /// Merge another ValidationErrors into this one
    pub fn merge(&mut self, other: ValidationErrors) {
        for (field, errors) in other.errors {
            self.errors
                .entry(field)
                .or_default()
                .extend(errors);
        }
    }

    /// Create ValidationErrors from a single error
    pub fn from_error(error: ValidationError) -> Self {
        let mut errors = Self::new();
        errors.add(error);
        errors
    }

    /// Convert to a JSON-serializable format
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": "validation_failed",
                "message": "Validation failed",
                "fields": self.errors
            }
        })
    }
}

impl Default for ValidationErrors {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            write!(f, "No validation errors")
        } else {
            write!(f, "Validation failed for {} field(s):", self.errors.len())?;
            for (field, field_errors) in &self.errors {
                for error in field_errors {
                    write!(f, "\n  {}: {}", field, error.message)?;
                }
            }
            Ok(())
        }
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self::from_error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_creation() {
        let error = ValidationError::new("organisation_type", "Invalid type");
        assert_eq!(error.field, "organisation_type");
        assert_eq!(error.message, "Invalid type");
        assert_eq!(error.code, "validation_failed");
        assert!(error.context.is_none());
        assert!(!error.is_base());
    }

    #[test]
    fn test_base_error() {
        let error = ValidationError::base("model must belong to exactly one organisation")
            .code("belongs_to_exactly_one");
        assert!(error.is_base());
        assert_eq!(error.field, BASE);
        assert_eq!(error.code, "belongs_to_exactly_one");
    }

    #[test]
    fn test_validation_errors_collection() {
        let mut errors = ValidationErrors::new();

        errors.add_base_error("model must belong to exactly one organisation");
        errors.add_error("organisation_type", "organisation_type must match the type of organisation");
        errors.add_base_error("model must belong to at most one organisation");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.total_errors(), 3);
        assert!(errors.has_field_errors(BASE));
        assert!(errors.has_field_errors("organisation_type"));
        assert!(!errors.has_field_errors("name"));
        assert_eq!(
            errors.base_messages(),
            vec![
                "model must belong to exactly one organisation",
                "model must belong to at most one organisation",
            ]
        );
        assert!(errors.includes("organisation_type", "organisation_type must match the type of organisation"));
        assert!(errors.messages("name").is_empty());
    }

    #[test]
    fn test_validation_errors_merge() {
        let mut errors1 = ValidationErrors::new();
        errors1.add_base_error("Error 1");

        let mut errors2 = ValidationErrors::new();
        errors2.add_error("field2", "Error 2");
        errors2.add_base_error("Error 3");

        errors1.merge(errors2);

        assert_eq!(errors1.len(), 2);
        assert_eq!(errors1.total_errors(), 3);
        assert_eq!(errors1.get_field_errors(BASE).map(Vec::len), Some(2));
    }

    #[test]
    fn test_to_json_lists_fields() {
        let errors = ValidationErrors::from(ValidationError::base("broken"));
        let json = errors.to_json();
        assert_eq!(json["error"]["code"], "validation_failed");
        assert_eq!(json["error"]["fields"]["base"][0]["message"], "broken");
    }
}
