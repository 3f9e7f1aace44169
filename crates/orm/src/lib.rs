//! # oneof-orm: exclusive polymorphic references
//!
//! Host model traits, belongs-to association reflection, and the
//! "belongs to one of" component: a single logical field over several
//! candidate foreign key columns, at most one of which is populated.

pub mod error;
pub mod model;
pub mod relationships;

// Re-export core traits and types
pub use error::*;
pub use model::*;
pub use relationships::*;
