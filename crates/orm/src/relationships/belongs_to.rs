//! BelongsTo Relationship - A foreign key column paired with its cached target

use serde_json::Value;

use crate::error::ModelResult;
use crate::model::{Model, PrimaryKey};

/// BelongsTo association slot embedded in a host record.
///
/// The id column is the source of truth; the cached target is dropped
/// whenever the column is rewritten to point somewhere else.
#[derive(Debug, Clone, PartialEq)]
pub struct BelongsTo<Parent>
where
    Parent: Model + Clone,
{
    foreign_key: String,
    id: Option<PrimaryKey>,
    parent: Option<Parent>,
}

impl<Parent> BelongsTo<Parent>
where
    Parent: Model + Clone,
{
    /// Create an empty BelongsTo association stored in `foreign_key`
    pub fn new(foreign_key: &str) -> Self {
        Self {
            foreign_key: foreign_key.to_string(),
            id: None,
            parent: None,
        }
    }

    /// Name of the id column
    pub fn foreign_key(&self) -> &str {
        &self.foreign_key
    }

    /// Get the parent model if loaded
    pub fn get(&self) -> Option<&Parent> {
        self.parent.as_ref()
    }

    /// Get the parent model, loading it through `find` when only the id
    /// column is populated
    pub fn resolve<F>(&self, find: F) -> Option<Parent>
    where
        F: FnOnce(&PrimaryKey) -> Option<Parent>,
    {
        match (&self.parent, &self.id) {
            (Some(parent), _) => Some(parent.clone()),
            (None, Some(id)) => find(id),
            (None, None) => None,
        }
    }

    /// Take ownership of the parent model, leaving the id column untouched
    pub fn take(&mut self) -> Option<Parent> {
        self.parent.take()
    }

    /// Set or clear the parent model. The id column follows the parent.
    pub fn set(&mut self, parent: Option<Parent>) {
        self.id = parent.as_ref().and_then(|p| p.primary_key());
        self.parent = parent;
    }

    /// Current value of the id column
    pub fn id(&self) -> Option<&PrimaryKey> {
        self.id.as_ref()
    }

    /// Write the id column directly
    pub fn set_id(&mut self, id: Option<PrimaryKey>) {
        let stale = self
            .parent
            .as_ref()
            .is_some_and(|p| p.primary_key() != id);
        if stale {
            self.parent = None;
        }
        self.id = id;
    }

    /// Id column as a column value
    pub fn id_value(&self) -> Value {
        self.id.as_ref().map(PrimaryKey::to_value).unwrap_or(Value::Null)
    }

    /// Write the id column from a column value
    pub fn set_id_value(&mut self, value: &Value) -> ModelResult<()> {
        self.set_id(PrimaryKey::from_value(value)?);
        Ok(())
    }

    /// Check if the id column is populated
    pub fn has_foreign_key(&self) -> bool {
        self.id.is_some()
    }

    /// Check if the parent model is loaded
    pub fn is_loaded(&self) -> bool {
        self.parent.is_some()
    }
}
