//! Core Model Trait - Base definition for host records
//!
//! Defines the Model trait with type metadata, primary key handling, and the
//! column-level attribute access that associations read and write through.

use std::collections::HashMap;
use std::fmt::Debug;

use serde_json::Value;

use crate::error::{ModelError, ModelResult};
use super::primary_key::PrimaryKey;

/// Core trait for records that own columns and associations
pub trait Model: Debug + Send + Sync {
    /// Declared type name of this model (e.g. `School`)
    fn model_name() -> &'static str
    where
        Self: Sized,
    {
        let full = std::any::type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full)
    }

    /// Table name for this model
    fn table_name() -> &'static str
    where
        Self: Sized;

    /// Primary key field name
    fn primary_key_name() -> &'static str
    where
        Self: Sized,
    {
        "id"
    }

    /// Get the primary key value for this model instance
    fn primary_key(&self) -> Option<PrimaryKey>;

    /// Convert model to column-value pairs
    fn to_fields(&self) -> HashMap<String, Value>;

    /// Read a single column. Unknown columns are an error, null columns are `Value::Null`.
    fn read_attribute(&self, column: &str) -> ModelResult<Value> {
        self.to_fields()
            .remove(column)
            .ok_or_else(|| ModelError::MissingAttribute(column.to_string()))
    }

    /// Write a single column
    fn write_attribute(&mut self, column: &str, value: Value) -> ModelResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Venue {
        id: Option<i64>,
        name: String,
    }

    impl Model for Venue {
        fn table_name() -> &'static str {
            "venues"
        }

        fn primary_key(&self) -> Option<PrimaryKey> {
            self.id.map(PrimaryKey::Integer)
        }

        fn to_fields(&self) -> HashMap<String, Value> {
            let mut fields = HashMap::new();
            fields.insert("id".to_string(), serde_json::json!(self.id));
            fields.insert("name".to_string(), Value::String(self.name.clone()));
            fields
        }

        fn write_attribute(&mut self, column: &str, value: Value) -> ModelResult<()> {
            match column {
                "name" => {
                    self.name = serde_json::from_value(value)?;
                    Ok(())
                }
                _ => Err(ModelError::MissingAttribute(column.to_string())),
            }
        }
    }

    #[test]
    fn test_model_name_defaults_to_type_name() {
        assert_eq!(Venue::model_name(), "Venue");
        assert_eq!(Venue::primary_key_name(), "id");
    }

    #[test]
    fn test_read_attribute() {
        let venue = Venue { id: Some(3), name: "Hall".to_string() };
        assert_eq!(venue.read_attribute("name").unwrap(), Value::String("Hall".to_string()));
        assert_eq!(venue.read_attribute("id").unwrap(), serde_json::json!(3));
        assert_eq!(
            venue.read_attribute("capacity"),
            Err(ModelError::MissingAttribute("capacity".to_string()))
        );
    }

    #[test]
    fn test_write_attribute() {
        let mut venue = Venue::default();
        venue.write_attribute("name", serde_json::json!("Arena")).unwrap();
        assert_eq!(venue.name, "Arena");
        assert!(venue.write_attribute("capacity", Value::Null).is_err());
        assert!(venue.write_attribute("name", serde_json::json!(12)).is_err());
    }
}
