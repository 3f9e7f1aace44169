//! Relationship Metadata System - Reflection data for declared associations

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};
use super::inference;

/// Reflection for one belongs-to association declared on a host model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipMetadata {
    /// Name of the association (accessor on the host model)
    pub name: String,

    /// The related model's table name
    pub related_table: String,

    /// The related model's declared type name
    pub related_model: String,

    /// Foreign key configuration
    pub foreign_key: ForeignKeyConfig,

    /// Key on the related model the foreign key points at (defaults to "id")
    pub local_key: String,

    /// Whether the association may be absent without failing presence checks
    pub optional: bool,
}

impl RelationshipMetadata {
    /// Create a new RelationshipMetadata instance
    pub fn new(
        name: String,
        related_table: String,
        related_model: String,
        foreign_key: ForeignKeyConfig,
    ) -> Self {
        Self {
            name,
            related_table,
            related_model,
            foreign_key,
            local_key: "id".to_string(),
            optional: false,
        }
    }

    /// Describe a belongs-to association named `accessor` stored in `column` on
    /// `host_table`. The target type and table are inferred from the accessor;
    /// the foreign key is only recorded as explicit when it departs from
    /// the `<accessor>_id` convention.
    pub fn belongs_to(accessor: &str, column: &str, host_table: &str) -> Self {
        let foreign_key = if inference::is_conventional_foreign_key(accessor, column) {
            ForeignKeyConfig::inferred(column.to_string(), host_table.to_string())
        } else {
            ForeignKeyConfig::explicit(column.to_string(), host_table.to_string())
        };

        Self::new(
            accessor.to_string(),
            inference::table_for(accessor),
            inference::camelize(accessor),
            foreign_key,
        )
    }

    /// Set the local key (primary key on the related model)
    pub fn with_local_key(mut self, local_key: String) -> Self {
        self.local_key = local_key;
        self
    }

    /// Mark the association as optional
    pub fn with_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Validate the relationship metadata for consistency
    pub fn validate(&self) -> ModelResult<()> {
        if self.name.is_empty() {
            return Err(ModelError::Configuration(
                "Relationship name cannot be empty".to_string()
            ));
        }

        if self.related_model.is_empty() {
            return Err(ModelError::Configuration(
                format!("Relationship '{}' must name a related model", self.name)
            ));
        }

        self.foreign_key.validate()
    }
}

/// Foreign key configuration for a belongs-to association
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeignKeyConfig {
    /// The foreign key column name
    pub column: String,

    /// The table where the foreign key is located
    pub table: String,

    /// Whether the column was supplied by the caller rather than inferred
    pub explicit: bool,
}

impl ForeignKeyConfig {
    /// A foreign key left to naming convention
    pub fn inferred(column: String, table: String) -> Self {
        Self {
            column,
            table,
            explicit: false,
        }
    }

    /// A foreign key the association must carry explicitly
    pub fn explicit(column: String, table: String) -> Self {
        Self {
            column,
            table,
            explicit: true,
        }
    }

    /// The column, only when it was given explicitly
    pub fn explicit_column(&self) -> Option<&str> {
        self.explicit.then_some(self.column.as_str())
    }

    /// Validate the foreign key configuration
    pub fn validate(&self) -> ModelResult<()> {
        if self.column.is_empty() {
            return Err(ModelError::Configuration(
                "Foreign key configuration must have a column".to_string()
            ));
        }

        if self.table.is_empty() {
            return Err(ModelError::Configuration(
                "Foreign key configuration must specify a table".to_string()
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conventional_belongs_to() {
        let metadata = RelationshipMetadata::belongs_to("school", "school_id", "competitors");

        assert_eq!(metadata.name, "school");
        assert_eq!(metadata.related_model, "School");
        assert_eq!(metadata.related_table, "schools");
        assert_eq!(metadata.local_key, "id");
        assert_eq!(metadata.foreign_key.column, "school_id");
        assert_eq!(metadata.foreign_key.table, "competitors");
        assert_eq!(metadata.foreign_key.explicit_column(), None);
        assert!(!metadata.optional);
        assert!(metadata.validate().is_ok());
    }

    #[test]
    fn test_custom_column_is_explicit() {
        let metadata = RelationshipMetadata::belongs_to("college", "my_college_id", "competitors")
            .with_optional(true);

        assert_eq!(metadata.foreign_key.explicit_column(), Some("my_college_id"));
        assert!(metadata.optional);
    }

    #[test]
    fn test_metadata_validation() {
        let metadata = RelationshipMetadata::new(
            "school".to_string(),
            "schools".to_string(),
            "School".to_string(),
            ForeignKeyConfig::inferred(String::new(), "competitors".to_string()),
        );
        assert!(metadata.validate().is_err());

        let metadata = RelationshipMetadata::new(
            "school".to_string(),
            "schools".to_string(),
            String::new(),
            ForeignKeyConfig::inferred("school_id".to_string(), "competitors".to_string()),
        );
        assert!(metadata.validate().is_err());
    }

    #[test]
    fn test_builder_pattern() {
        let metadata = RelationshipMetadata::belongs_to("school", "school_id", "competitors")
            .with_local_key("uuid".to_string())
            .with_optional(true);

        assert_eq!(metadata.local_key, "uuid");
        assert!(metadata.optional);
    }
}
