//! Exclusive polymorphic references ("belongs to one of")
//!
//! A logical field that points at exactly one of several candidate models,
//! each stored in its own foreign key column, with an optional discriminator
//! column naming the active candidate's type. The field is declared once per
//! host model through [`ResourceAssociationConfig::builder`] (or a
//! [`ResourceDeclaration`]) and used through a [`BelongsToOneOf`] facade.

pub mod config;
pub mod declaration;
pub mod facade;


pub use config::{
    CandidateAssociation, Candidates, Discriminator, Identifier, OperationNames,
    ResourceAssociationBuilder, ResourceAssociationConfig,
};
pub use declaration::{load_declarations, ResourceDeclaration};
pub use facade::{BelongsToOneOf, ValidatorKind};
