//! # oneof-validation
//!
//! Record-level validation pipeline: named validators run in registration
//! order and append messages to a shared error collection keyed by field,
//! with a `base` key for errors that concern the record as a whole.

pub mod error;
pub mod traits;

// Re-exports for easy access
pub use error::{ValidationError, ValidationErrors, ValidationResult, BASE};
pub use traits::{RecordValidator, Validate, ValidatorSet};
