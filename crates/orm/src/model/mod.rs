//! Model System - Host record traits
//!
//! - `core_trait`: Core Model trait definition and attribute access
//! - `primary_key`: Primary key types and column conversion

pub mod core_trait;
pub mod primary_key;

// Re-export main types and traits for convenience
pub use core_trait::Model;
pub use primary_key::PrimaryKey;
