//! Relationship Traits - Seams between host records and their associations

use std::fmt::Debug;

use crate::error::ModelResult;
use crate::model::{Model, PrimaryKey};

/// A value that can be stored in a belongs-to association.
///
/// Exclusive references take a tagged union over their candidate models; each
/// variant reports the declared type name of the model it wraps, which is
/// what gets matched against association reflection.
pub trait Resource: Clone + Debug + PartialEq + Send + Sync {
    /// Declared type name of the wrapped record (e.g. `School`)
    fn type_name(&self) -> &str;

    /// Primary key of the wrapped record, if it has been persisted
    fn resource_id(&self) -> Option<PrimaryKey>;
}

/// A record exposing its belongs-to associations by name
pub trait AssociationHost: Model {
    /// Values this record's associations can hold
    type Resource: Resource;

    /// Resolve the record behind the association called `name`
    fn association(&self, name: &str) -> ModelResult<Option<Self::Resource>>;

    /// Assign or clear the association called `name`, keeping its id column in sync
    fn set_association(&mut self, name: &str, value: Option<Self::Resource>) -> ModelResult<()>;
}
