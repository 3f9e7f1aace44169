//! Primary Key System - Types for record primary keys and id columns
//!
//! Supports integer and UUID keys, with conversion to and from the
//! `serde_json::Value` representation columns are exchanged in.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::{ModelError, ModelResult};

/// Primary key types supported by the ORM
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimaryKey {
    /// Auto-incrementing integer primary key
    Integer(i64),
    /// UUID primary key
    Uuid(Uuid),
}

impl std::fmt::Display for PrimaryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrimaryKey::Integer(id) => write!(f, "{}", id),
            PrimaryKey::Uuid(id) => write!(f, "{}", id),
        }
    }
}

impl PrimaryKey {
    /// Extract as i64 if this is an Integer primary key
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            PrimaryKey::Integer(id) => Some(*id),
            _ => None,
        }
    }

    /// Extract as UUID if this is a UUID primary key
    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            PrimaryKey::Uuid(id) => Some(*id),
            _ => None,
        }
    }

    /// Column representation of this key
    pub fn to_value(&self) -> Value {
        match self {
            PrimaryKey::Integer(id) => Value::from(*id),
            PrimaryKey::Uuid(id) => Value::String(id.to_string()),
        }
    }

    /// Parse an id column. Null means the column is unset.
    pub fn from_value(value: &Value) -> ModelResult<Option<Self>> {
        match value {
            Value::Null => Ok(None),
            Value::Number(n) => n
                .as_i64()
                .map(|id| Some(PrimaryKey::Integer(id)))
                .ok_or_else(|| ModelError::InvalidKey(format!("{} is not an integer key", n))),
            Value::String(s) => Uuid::parse_str(s)
                .map(|id| Some(PrimaryKey::Uuid(id)))
                .map_err(|_| ModelError::InvalidKey(format!("'{}' is not a UUID key", s))),
            other => Err(ModelError::InvalidKey(format!("unsupported key value {}", other))),
        }
    }
}

impl From<i64> for PrimaryKey {
    fn from(id: i64) -> Self {
        PrimaryKey::Integer(id)
    }
}

impl From<Uuid> for PrimaryKey {
    fn from(id: Uuid) -> Self {
        PrimaryKey::Uuid(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_primary_key_display() {
        let int_key = PrimaryKey::Integer(123);
        assert_eq!(format!("{}", int_key), "123");

        let uuid_key =
            PrimaryKey::Uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap());
        assert_eq!(
            format!("{}", uuid_key),
            "550e8400-e29b-41d4-a716-446655440000"
        );
    }

    #[test]
    fn test_from_value() {
        assert_eq!(PrimaryKey::from_value(&Value::Null).unwrap(), None);
        assert_eq!(PrimaryKey::from_value(&json!(7)).unwrap(), Some(PrimaryKey::Integer(7)));

        let id = Uuid::new_v4();
        assert_eq!(
            PrimaryKey::from_value(&json!(id.to_string())).unwrap(),
            Some(PrimaryKey::Uuid(id))
        );

        assert!(matches!(PrimaryKey::from_value(&json!("school")), Err(ModelError::InvalidKey(_))));
        assert!(matches!(PrimaryKey::from_value(&json!(1.5)), Err(ModelError::InvalidKey(_))));
        assert!(matches!(PrimaryKey::from_value(&json!([1])), Err(ModelError::InvalidKey(_))));
    }

    #[test]
    fn test_value_conversion_is_symmetric() {
        let key = PrimaryKey::from(42);
        assert_eq!(key.to_value(), json!(42));
        assert_eq!(key.as_i64(), Some(42));
        assert_eq!(key.as_uuid(), None);
    }
}
