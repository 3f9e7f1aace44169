//! Exclusive reference declarations read from YAML or JSON
//!
//! ```yaml
//! - resource_key: organisation
//!   candidates: [college, school]
//!   include_type_column: true
//! - resource_key: sponsor
//!   candidates: {company: sponsor_company_id, charity: sponsor_charity_id}
//! ```
//!
//! Raw values stay as `serde_json::Value`; a wrongly-shaped declaration is a
//! configuration error naming what was received.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ModelError, ModelResult};
use super::config::{Candidates, Discriminator, ResourceAssociationBuilder};

/// One exclusive reference as written in a configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDeclaration {
    pub resource_key: Value,
    #[serde(default)]
    pub candidates: Value,
    #[serde(default)]
    pub include_type_column: Value,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DeclarationFile {
    Many(Vec<ResourceDeclaration>),
    One(ResourceDeclaration),
}

impl ResourceDeclaration {
    /// Parse a single declaration from YAML
    pub fn from_yaml_str(source: &str) -> ModelResult<Self> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Parse a single declaration from a JSON value
    pub fn from_json(value: Value) -> ModelResult<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Check the raw shapes and turn them into a builder
    pub fn into_builder(self) -> ModelResult<ResourceAssociationBuilder> {
        let resource_key = match &self.resource_key {
            Value::String(key) => key.clone(),
            other => {
                return Err(ModelError::Configuration(format!(
                    "expected resource_key to be a symbol, received {}",
                    kind_of(other)
                )))
            }
        };

        Ok(ResourceAssociationBuilder::new(resource_key)
            .candidates(Candidates::try_from(&self.candidates)?)
            .include_discriminator(Discriminator::try_from(&self.include_type_column)?))
    }
}

/// Read every declaration in a YAML (or JSON) file. The file may hold a single
/// declaration or a sequence of them.
pub fn load_declarations(path: impl AsRef<Path>) -> ModelResult<Vec<ResourceDeclaration>> {
    let content = std::fs::read_to_string(path.as_ref())?;
    let file: DeclarationFile = serde_yaml::from_str(&content)?;
    Ok(match file {
        DeclarationFile::Many(declarations) => declarations,
        DeclarationFile::One(declaration) => vec![declaration],
    })
}

impl TryFrom<&Value> for Candidates {
    type Error = ModelError;

    fn try_from(value: &Value) -> ModelResult<Self> {
        match value {
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::String(name) => Ok(name.clone()),
                    other => Err(ModelError::Configuration(format!(
                        "expected a symbol, received {}",
                        other
                    ))),
                })
                .collect::<ModelResult<Vec<_>>>()
                .map(Candidates::List),
            Value::Object(entries) => entries
                .iter()
                .map(|(accessor, column)| match column {
                    Value::String(column) => Ok((accessor.clone(), column.clone())),
                    other => Err(ModelError::Configuration(format!(
                        "expected the id column for '{}' to be a symbol, received {}",
                        accessor, other
                    ))),
                })
                .collect::<ModelResult<Vec<_>>>()
                .map(Candidates::Map),
            other => Err(ModelError::Configuration(format!(
                "possible_resource_types must be an Array or a Hash, received {}",
                kind_of(other)
            ))),
        }
    }
}

impl TryFrom<&Value> for Discriminator {
    type Error = ModelError;

    fn try_from(value: &Value) -> ModelResult<Self> {
        match value {
            Value::Null => Ok(Discriminator::Off),
            Value::Bool(enabled) => Ok(Discriminator::from(*enabled)),
            Value::String(column) => Ok(Discriminator::Column(column.clone())),
            other => Err(ModelError::Configuration(format!(
                "include_type_column must be a boolean or a column name, received {}",
                kind_of(other)
            ))),
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "nothing",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a hash",
    }
}
