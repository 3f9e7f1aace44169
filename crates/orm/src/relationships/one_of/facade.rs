//! BelongsToOneOf - unified accessor and validators over an exclusive reference

use std::marker::PhantomData;
use std::sync::Arc;

use oneof_validation::{ValidationError, ValidationErrors, ValidatorSet};
use serde_json::Value;

use crate::error::{ModelError, ModelResult};
use crate::model::PrimaryKey;
use crate::relationships::registry::RelationshipRegistry;
use crate::relationships::traits::{AssociationHost, Resource};
use super::config::{
    CandidateAssociation, Candidates, Discriminator, OperationNames, ResourceAssociationConfig,
};

/// Validators an exclusive reference can install on its host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatorKind {
    /// Exactly one candidate populated
    ExactlyOne,
    /// Zero or one candidate populated
    AtMostOne,
    /// Discriminator column agrees with the active candidate
    DiscriminatorMatches,
}

/// Accessor facade for one exclusive reference on host records of type `H`.
///
/// Holds only the shared, immutable configuration; every operation takes
/// the record it works on.
pub struct BelongsToOneOf<H> {
    config: Arc<ResourceAssociationConfig>,
    _host: PhantomData<fn(&H)>,
}

impl<H> Clone for BelongsToOneOf<H> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            _host: PhantomData,
        }
    }
}

impl<H> std::fmt::Debug for BelongsToOneOf<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BelongsToOneOf")
            .field("config", &self.config)
            .finish()
    }
}

impl<H> BelongsToOneOf<H>
where
    H: AssociationHost,
{
    /// Wrap an already resolved configuration
    pub fn new(config: impl Into<Arc<ResourceAssociationConfig>>) -> Self {
        Self {
            config: config.into(),
            _host: PhantomData,
        }
    }

    /// Declare an exclusive reference on `H` and register its candidates
    pub fn declare(
        registry: &RelationshipRegistry,
        resource_key: &str,
        candidates: Candidates,
        discriminator: impl Into<Discriminator>,
    ) -> ModelResult<Self> {
        let config = ResourceAssociationConfig::builder(resource_key)
            .candidates(candidates)
            .include_discriminator(discriminator)
            .build::<H>(registry)?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &ResourceAssociationConfig {
        &self.config
    }

    pub fn names(&self) -> OperationNames {
        self.config.operation_names()
    }

    /// The referenced record: the first candidate, in declaration order,
    /// whose association resolves.
    pub fn get(&self, record: &H) -> ModelResult<Option<H::Resource>> {
        for candidate in self.config.candidates() {
            if let Some(value) = record.association(candidate.accessor())? {
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    /// The first populated id column, read without resolving associations
    pub fn get_id(&self, record: &H) -> ModelResult<Option<PrimaryKey>> {
        let mut populated = Vec::new();
        for column in self.config.id_columns() {
            if let Some(id) = PrimaryKey::from_value(&record.read_attribute(column)?)? {
                populated.push((column, id));
            }
        }

        if populated.len() > 1 {
            tracing::warn!(
                "'{}' has {} populated id columns on {}; using {}",
                self.config.resource_key(),
                populated.len(),
                self.config.host_model(),
                populated[0].0
            );
        }

        Ok(populated.into_iter().next().map(|(_, id)| id))
    }

    /// Declared type name of the referenced record, derived from the value
    /// itself rather than from the discriminator column.
    pub fn get_discriminator(&self, record: &H) -> ModelResult<Option<&str>> {
        Ok(self
            .get(record)?
            .and_then(|value| self.match_candidate(&value))
            .map(CandidateAssociation::target_type))
    }

    /// The `<key>_type` getter: the stored discriminator when one is
    /// configured, otherwise the derived type name.
    pub fn resource_type(&self, record: &H) -> ModelResult<Option<String>> {
        match self.config.discriminator_column() {
            Some(column) => stored_type(record, column),
            None => Ok(self.get_discriminator(record)?.map(str::to_string)),
        }
    }

    /// Point the reference at `value`, clearing every other candidate.
    /// `None` leaves the record untouched.
    pub fn set(&self, record: &mut H, value: Option<H::Resource>) -> ModelResult<()> {
        let Some(value) = value else {
            return Ok(());
        };

        for accessor in self.config.accessors() {
            record.set_association(accessor, None)?;
        }

        let candidate = self.match_candidate(&value).ok_or_else(|| {
            ModelError::TypeMismatch(format!(
                "one of {} expected, got {:?} which is an instance of {}",
                self.config.accessors().collect::<Vec<_>>().join(", "),
                value,
                value.type_name()
            ))
        })?;

        tracing::debug!(
            "Setting '{}' on {} through '{}' (id {:?})",
            self.config.resource_key(),
            self.config.host_model(),
            candidate.accessor(),
            value.resource_id()
        );

        record.set_association(candidate.accessor(), Some(value))?;

        if let Some(column) = self.config.discriminator_column() {
            record.write_attribute(column, Value::String(candidate.target_type().to_string()))?;
        }

        Ok(())
    }

    /// Adds a base error unless exactly one candidate is populated
    pub fn validate_exactly_one(&self, record: &H, errors: &mut ValidationErrors) -> ModelResult<()> {
        let count = self.populated_count(record)?;
        tracing::trace!("'{}' exactly-one check: {} populated", self.config.resource_key(), count);

        if count != 1 {
            errors.add(
                ValidationError::base(format!(
                    "model must belong to exactly one {}",
                    self.config.resource_key()
                ))
                .code("belongs_to_exactly_one"),
            );
        }
        Ok(())
    }

    /// Adds a base error when more than one candidate is populated
    pub fn validate_at_most_one(&self, record: &H, errors: &mut ValidationErrors) -> ModelResult<()> {
        let count = self.populated_count(record)?;
        tracing::trace!("'{}' at-most-one check: {} populated", self.config.resource_key(), count);

        if count > 1 {
            errors.add(
                ValidationError::base(format!(
                    "model must belong to at most one {}",
                    self.config.resource_key()
                ))
                .code("belongs_to_at_most_one"),
            );
        }
        Ok(())
    }

    /// Adds an error on the discriminator column when it disagrees with the
    /// referenced record's type. Nothing is checked while the reference is unset.
    pub fn validate_discriminator_matches(&self, record: &H, errors: &mut ValidationErrors) -> ModelResult<()> {
        let column = self.discriminator_column()?;

        if self.get(record)?.is_none() {
            return Ok(());
        }

        let actual = self.get_discriminator(record)?;
        let stored = stored_type(record, column)?;
        tracing::trace!(
            "'{}' discriminator check: derived {:?}, stored {:?}",
            self.config.resource_key(),
            actual,
            stored
        );

        if actual != stored.as_deref() {
            errors.add(ValidationError::with_code(
                column,
                format!("{} must match the type of {}", column, self.config.resource_key()),
                "type_mismatch",
            ));
        }
        Ok(())
    }

    /// Register a validator on `validators` under its generated name
    pub fn install(&self, validators: &mut ValidatorSet<H, ModelError>, kind: ValidatorKind) -> ModelResult<()>
    where
        H: 'static,
    {
        let names = self.names();
        let facade = self.clone();

        match kind {
            ValidatorKind::ExactlyOne => {
                validators.register(names.exactly_one, move |record: &H, errors: &mut ValidationErrors| {
                    facade.validate_exactly_one(record, errors)
                });
            }
            ValidatorKind::AtMostOne => {
                validators.register(names.at_most_one, move |record: &H, errors: &mut ValidationErrors| {
                    facade.validate_at_most_one(record, errors)
                });
            }
            ValidatorKind::DiscriminatorMatches => {
                let name = names.type_matches.ok_or_else(|| {
                    ModelError::Configuration(format!(
                        "'{}' has no discriminator column to validate",
                        self.config.resource_key()
                    ))
                })?;
                validators.register(name, move |record: &H, errors: &mut ValidationErrors| {
                    facade.validate_discriminator_matches(record, errors)
                });
            }
        }
        Ok(())
    }

    fn discriminator_column(&self) -> ModelResult<&str> {
        self.config.discriminator_column().ok_or_else(|| {
            ModelError::Configuration(format!(
                "'{}' was declared without a discriminator column",
                self.config.resource_key()
            ))
        })
    }

    fn populated_count(&self, record: &H) -> ModelResult<usize> {
        let mut count = 0;
        for accessor in self.config.accessors() {
            if record.association(accessor)?.is_some() {
                count += 1;
            }
        }
        Ok(count)
    }

    fn match_candidate(&self, value: &H::Resource) -> Option<&CandidateAssociation> {
        self.config.candidate_for_type(value.type_name())
    }
}

fn stored_type<H: AssociationHost>(record: &H, column: &str) -> ModelResult<Option<String>> {
    match record.read_attribute(column)? {
        Value::Null => Ok(None),
        Value::String(type_name) => Ok(Some(type_name)),
        other => Ok(Some(other.to_string())),
    }
}
