//! Exclusive reference configuration
//!
//! Resolves a field declaration (resource key, candidate list or mapping,
//! discriminator option) into an immutable [`ResourceAssociationConfig`] and
//! registers one optional belongs-to association per candidate with the
//! host model.

use std::collections::HashSet;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ModelError, ModelResult};
use crate::model::Model;
use crate::relationships::inference;
use crate::relationships::metadata::RelationshipMetadata;
use crate::relationships::registry::RelationshipRegistry;

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid")
});

/// A bare identifier token: a resource key, accessor or column name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(String);

impl Identifier {
    /// Parse an identifier, rejecting anything that is not a bare token
    pub fn parse(raw: &str) -> ModelResult<Self> {
        if IDENTIFIER.is_match(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(ModelError::Configuration(format!(
                "expected an identifier, received {:?}",
                raw
            )))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The candidate types an exclusive reference may point at
#[derive(Debug, Clone, PartialEq)]
pub enum Candidates {
    /// Type names; each id column is `<underscored name>_id`
    List(Vec<String>),
    /// Accessor name -> id column, in declaration order
    Map(Vec<(String, String)>),
}

impl Candidates {
    /// Candidates whose id columns follow the naming convention
    pub fn list<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Candidates::List(names.into_iter().map(Into::into).collect())
    }

    /// Candidates with explicit id columns
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Candidates::Map(
            entries
                .into_iter()
                .map(|(accessor, column)| (accessor.into(), column.into()))
                .collect(),
        )
    }

    /// Normalise into `(accessor, id column)` pairs
    fn normalise(&self) -> ModelResult<Vec<(Identifier, Identifier)>> {
        let table = match self {
            Candidates::List(names) => names
                .iter()
                .map(|name| -> ModelResult<(Identifier, Identifier)> {
                    let accessor = Identifier::parse(name).map_err(|_| {
                        ModelError::Configuration(format!("expected a symbol, received {:?}", name))
                    })?;
                    let column = Identifier::parse(&inference::foreign_key_for(name))?;
                    Ok((accessor, column))
                })
                .collect::<ModelResult<Vec<_>>>()?,
            Candidates::Map(entries) => entries
                .iter()
                .map(|(accessor, column)| -> ModelResult<(Identifier, Identifier)> {
                    Ok((Identifier::parse(accessor)?, Identifier::parse(column)?))
                })
                .collect::<ModelResult<Vec<_>>>()?,
        };

        if table.is_empty() {
            return Err(ModelError::Configuration(
                "an exclusive reference needs at least one candidate".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for (accessor, _) in &table {
            if !seen.insert(accessor.as_str()) {
                return Err(ModelError::Configuration(format!(
                    "candidate '{}' is declared more than once",
                    accessor
                )));
            }
        }

        Ok(table)
    }
}

/// Whether and where the active candidate's type name is stored
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Discriminator {
    /// No discriminator column
    #[default]
    Off,
    /// `<resource_key>_type`
    DefaultColumn,
    /// A caller-chosen column
    Column(String),
}

impl Discriminator {
    fn resolve(&self, resource_key: &Identifier) -> ModelResult<Option<Identifier>> {
        match self {
            Discriminator::Off => Ok(None),
            Discriminator::DefaultColumn => {
                Identifier::parse(&format!("{}_type", resource_key)).map(Some)
            }
            Discriminator::Column(column) => Identifier::parse(column).map(Some),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self, Discriminator::Off)
    }
}

impl From<bool> for Discriminator {
    fn from(enabled: bool) -> Self {
        if enabled {
            Discriminator::DefaultColumn
        } else {
            Discriminator::Off
        }
    }
}

impl From<&str> for Discriminator {
    fn from(column: &str) -> Self {
        Discriminator::Column(column.to_string())
    }
}

/// One candidate of an exclusive reference, as registered on the host model
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateAssociation {
    accessor: Identifier,
    id_column: Identifier,
    metadata: RelationshipMetadata,
}

impl CandidateAssociation {
    /// Association name on the host model
    pub fn accessor(&self) -> &str {
        self.accessor.as_str()
    }

    /// Foreign key column on the host model
    pub fn id_column(&self) -> &str {
        self.id_column.as_str()
    }

    /// Declared type name of the associated model
    pub fn target_type(&self) -> &str {
        &self.metadata.related_model
    }

    /// Reflection registered for this candidate
    pub fn metadata(&self) -> &RelationshipMetadata {
        &self.metadata
    }
}

/// The names a field declaration exposes on its host model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationNames {
    pub getter: String,
    pub setter: String,
    pub id_getter: String,
    pub type_getter: String,
    pub exactly_one: String,
    pub at_most_one: String,
    /// Only present when a discriminator column is configured
    pub type_matches: Option<String>,
}

/// Resolved, immutable configuration of one exclusive reference
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceAssociationConfig {
    resource_key: Identifier,
    candidates: Vec<CandidateAssociation>,
    include_discriminator: Discriminator,
    discriminator_column: Option<Identifier>,
    host_model: String,
}

impl ResourceAssociationConfig {
    /// Start declaring an exclusive reference called `resource_key`
    pub fn builder(resource_key: impl Into<String>) -> ResourceAssociationBuilder {
        ResourceAssociationBuilder::new(resource_key)
    }

    pub fn resource_key(&self) -> &str {
        self.resource_key.as_str()
    }

    /// Candidates in declaration order
    pub fn candidates(&self) -> &[CandidateAssociation] {
        &self.candidates
    }

    pub fn include_discriminator(&self) -> &Discriminator {
        &self.include_discriminator
    }

    pub fn discriminator_column(&self) -> Option<&str> {
        self.discriminator_column.as_ref().map(Identifier::as_str)
    }

    /// Host model this reference is declared on
    pub fn host_model(&self) -> &str {
        &self.host_model
    }

    /// Accessor names in declaration order
    pub fn accessors(&self) -> impl Iterator<Item = &str> {
        self.candidates.iter().map(CandidateAssociation::accessor)
    }

    /// Id columns in declaration order
    pub fn id_columns(&self) -> impl Iterator<Item = &str> {
        self.candidates.iter().map(CandidateAssociation::id_column)
    }

    /// Look up a candidate by accessor
    pub fn candidate(&self, accessor: &str) -> Option<&CandidateAssociation> {
        self.candidates.iter().find(|c| c.accessor() == accessor)
    }

    /// First declared candidate whose target type is `type_name`
    pub fn candidate_for_type(&self, type_name: &str) -> Option<&CandidateAssociation> {
        self.candidates.iter().find(|c| c.target_type() == type_name)
    }

    /// Names of the operations this reference exposes
    pub fn operation_names(&self) -> OperationNames {
        let key = self.resource_key.as_str();
        OperationNames {
            getter: key.to_string(),
            setter: format!("{}=", key),
            id_getter: format!("{}_id", key),
            type_getter: match &self.discriminator_column {
                Some(column) => column.to_string(),
                None => format!("{}_type", key),
            },
            exactly_one: format!("belongs_to_exactly_one_{}", key),
            at_most_one: format!("belongs_to_at_most_one_{}", key),
            type_matches: self
                .discriminator_column
                .as_ref()
                .map(|column| format!("{}_matches_{}", column, key)),
        }
    }
}

/// Builder collecting a field declaration before it is resolved
#[derive(Debug, Clone)]
pub struct ResourceAssociationBuilder {
    resource_key: String,
    candidates: Option<Candidates>,
    discriminator: Discriminator,
}

impl ResourceAssociationBuilder {
    pub fn new(resource_key: impl Into<String>) -> Self {
        Self {
            resource_key: resource_key.into(),
            candidates: None,
            discriminator: Discriminator::Off,
        }
    }

    /// Set the candidate types
    pub fn candidates(mut self, candidates: Candidates) -> Self {
        self.candidates = Some(candidates);
        self
    }

    /// Enable, disable or relocate the discriminator column
    pub fn include_discriminator(mut self, discriminator: impl Into<Discriminator>) -> Self {
        self.discriminator = discriminator.into();
        self
    }

    /// Resolve against host model `H` and register its candidate associations
    pub fn build<H: Model>(self, registry: &RelationshipRegistry) -> ModelResult<ResourceAssociationConfig> {
        self.build_for(H::model_name(), H::table_name(), registry)
    }

    /// Resolve against a host model known only by name and table
    pub fn build_for(
        self,
        host_model: &str,
        host_table: &str,
        registry: &RelationshipRegistry,
    ) -> ModelResult<ResourceAssociationConfig> {
        let resource_key = Identifier::parse(&self.resource_key).map_err(|_| {
            ModelError::Configuration(format!(
                "expected resource_key to be a symbol, received {:?}",
                self.resource_key
            ))
        })?;

        let table = self
            .candidates
            .as_ref()
            .ok_or_else(|| {
                ModelError::Configuration(format!(
                    "no candidate types given for '{}'",
                    resource_key
                ))
            })?
            .normalise()?;

        let discriminator_column = self.discriminator.resolve(&resource_key)?;
        if let Some(column) = &discriminator_column {
            if table.iter().any(|(_, id_column)| id_column == column) {
                return Err(ModelError::Configuration(format!(
                    "discriminator column '{}' is also a candidate id column",
                    column
                )));
            }
        }

        let mut candidates = Vec::with_capacity(table.len());
        for (accessor, id_column) in table {
            let metadata = RelationshipMetadata::belongs_to(accessor.as_str(), id_column.as_str(), host_table)
                .with_optional(true);
            registry.register(host_model, metadata.clone())?;
            candidates.push(CandidateAssociation {
                accessor,
                id_column,
                metadata,
            });
        }

        tracing::debug!(
            "Declared exclusive reference '{}' on {} over [{}]",
            resource_key,
            host_model,
            candidates
                .iter()
                .map(CandidateAssociation::accessor)
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(ResourceAssociationConfig {
            resource_key,
            candidates,
            include_discriminator: self.discriminator,
            discriminator_column,
            host_model: host_model.to_string(),
        })
    }
}
