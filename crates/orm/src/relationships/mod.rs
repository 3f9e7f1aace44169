//! Relationships Module - belongs-to associations, their reflection, and
//! exclusive references built on top of them

pub mod traits;
pub mod belongs_to;
pub mod inference;
pub mod metadata;
pub mod registry;
pub mod one_of;

// Re-export main types
pub use traits::*;
pub use belongs_to::*;
pub use metadata::*;
pub use registry::*;
pub use one_of::*;
