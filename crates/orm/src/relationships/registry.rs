//! Relationship Registry - Runtime metadata storage and access system

use std::sync::Arc;

use dashmap::DashMap;
use once_cell::sync::Lazy;

use crate::error::ModelResult;
use super::metadata::RelationshipMetadata;

static GLOBAL_REGISTRY: Lazy<RelationshipRegistry> = Lazy::new(RelationshipRegistry::new);

/// Thread-safe relationship registry storing association metadata per host model
#[derive(Debug, Clone)]
pub struct RelationshipRegistry {
    /// Map of model name -> associations in declaration order
    relationships: Arc<DashMap<String, Vec<RelationshipMetadata>>>,
}

impl Default for RelationshipRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RelationshipRegistry {
    /// Create a new empty relationship registry
    pub fn new() -> Self {
        Self {
            relationships: Arc::new(DashMap::new()),
        }
    }

    /// The process-wide registry
    pub fn global() -> &'static RelationshipRegistry {
        &GLOBAL_REGISTRY
    }

    /// Register an association for a model. Re-registering a name replaces
    /// the earlier declaration in place.
    pub fn register(&self, model_name: &str, metadata: RelationshipMetadata) -> ModelResult<()> {
        metadata.validate()?;

        tracing::debug!(
            "Registering belongs_to '{}' on {} (foreign key {}{}, optional: {})",
            metadata.name,
            model_name,
            metadata.foreign_key.column,
            if metadata.foreign_key.explicit { ", explicit" } else { "" },
            metadata.optional
        );

        let mut model_relationships = self.relationships
            .entry(model_name.to_string())
            .or_default();

        match model_relationships.iter().position(|existing| existing.name == metadata.name) {
            Some(index) => model_relationships[index] = metadata,
            None => model_relationships.push(metadata),
        }

        Ok(())
    }

    /// Get relationship metadata by model and relationship name
    pub fn get(&self, model_name: &str, relationship_name: &str) -> Option<RelationshipMetadata> {
        self.relationships
            .get(model_name)?
            .iter()
            .find(|metadata| metadata.name == relationship_name)
            .cloned()
    }

    /// Get all relationships for a model, in declaration order
    pub fn get_all_for_model(&self, model_name: &str) -> Vec<RelationshipMetadata> {
        self.relationships
            .get(model_name)
            .map(|entry| entry.clone())
            .unwrap_or_default()
    }

    /// Check if a relationship exists
    pub fn has_relationship(&self, model_name: &str, relationship_name: &str) -> bool {
        self.get(model_name, relationship_name).is_some()
    }

    /// Get all relationship names for a model, in declaration order
    pub fn get_relationship_names(&self, model_name: &str) -> Vec<String> {
        self.relationships
            .get(model_name)
            .map(|relationships| relationships.iter().map(|m| m.name.clone()).collect())
            .unwrap_or_default()
    }

    /// Drop every association registered for a model
    pub fn clear_model(&self, model_name: &str) {
        self.relationships.remove(model_name);
    }

    /// Names of every model with registered associations
    pub fn model_names(&self) -> Vec<String> {
        self.relationships.iter().map(|entry| entry.key().clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn school() -> RelationshipMetadata {
        RelationshipMetadata::belongs_to("school", "school_id", "competitors").with_optional(true)
    }

    fn college() -> RelationshipMetadata {
        RelationshipMetadata::belongs_to("college", "my_college_id", "competitors").with_optional(true)
    }

    #[test]
    fn test_registry_basic_operations() {
        let registry = RelationshipRegistry::new();

        registry.register("Competitor", college()).unwrap();
        registry.register("Competitor", school()).unwrap();

        assert!(registry.has_relationship("Competitor", "school"));
        assert!(!registry.has_relationship("Competitor", "academy"));
        assert!(!registry.has_relationship("Judge", "school"));
        assert_eq!(registry.get_relationship_names("Competitor"), vec!["college", "school"]);
        assert_eq!(
            registry.get("Competitor", "college").unwrap().foreign_key.explicit_column(),
            Some("my_college_id")
        );
        assert_eq!(registry.model_names(), vec!["Competitor".to_string()]);
    }

    #[test]
    fn test_reregistering_replaces_in_place() {
        let registry = RelationshipRegistry::new();
        registry.register("Competitor", school()).unwrap();
        registry.register("Competitor", college()).unwrap();
        registry
            .register("Competitor", RelationshipMetadata::belongs_to("school", "my_school_id", "competitors"))
            .unwrap();

        let all = registry.get_all_for_model("Competitor");
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].foreign_key.column, "my_school_id");
        assert_eq!(all[1].name, "college");
    }

    #[test]
    fn test_invalid_metadata_is_rejected() {
        let registry = RelationshipRegistry::new();
        let mut broken = school();
        broken.foreign_key.column.clear();

        assert!(registry.register("Competitor", broken).is_err());
        assert!(registry.get_all_for_model("Competitor").is_empty());
    }

    #[test]
    fn test_clear_model() {
        let registry = RelationshipRegistry::new();
        registry.register("Competitor", school()).unwrap();
        registry.clear_model("Competitor");
        assert!(registry.get_relationship_names("Competitor").is_empty());
    }
}
