//! The validation rule bound to a single property.
//!
//! Definitions have a canonical JSON form, which is also their serde form:
//!
//! | JSON                        | Definition                          |
//! |-----------------------------|-------------------------------------|
//! | `null`                      | [`PropertyDefinition::None`]        |
//! | `"Id"` or `["Id"]`          | [`PropertyDefinition::Validator`]   |
//! | `["Id", options]`           | [`PropertyDefinition::ValidatorWithOptions`] |
//!
//! Parsing only checks shape. Whether `Id` resolves to a registered validator
//! and whether `options` is a mapping is decided by the definition checks in
//! [`PropertyDefinitions`](crate::PropertyDefinitions).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use smartdata_validators::Options;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub enum PropertyDefinition {
    /// No validation; the raw value is stored as-is.
    None,
    /// Value is passed through the named validator with empty options.
    Validator(String),
    /// Value is passed through the named validator with explicit options.
    /// `None` options are treated as empty.
    ValidatorWithOptions(String, Option<Value>),
}

/// A definition whose JSON form is not one of the accepted shapes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct DefinitionShapeError(String);

impl DefinitionShapeError {
    pub fn reason(&self) -> &str {
        &self.0
    }
}

impl PropertyDefinition {
    /// Shorthand for [`PropertyDefinition::Validator`].
    pub fn validator(id: impl Into<String>) -> Self {
        Self::Validator(id.into())
    }

    /// Shorthand for [`PropertyDefinition::ValidatorWithOptions`] with a mapping.
    pub fn with_options(id: impl Into<String>, options: Options) -> Self {
        Self::ValidatorWithOptions(id.into(), Some(Value::Object(options)))
    }

    /// The referenced validator id, if any.
    pub fn validator_id(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::Validator(id) | Self::ValidatorWithOptions(id, _) => Some(id),
        }
    }

    /// Parses the canonical JSON form.
    pub fn from_json(value: Value) -> Result<Self, DefinitionShapeError> {
        match value {
            Value::Null => Ok(Self::None),
            Value::String(id) => Ok(Self::Validator(id)),
            Value::Array(items) => {
                let mut items = items.into_iter();
                match (items.next(), items.next(), items.next()) {
                    (Some(Value::String(id)), None, None) => Ok(Self::Validator(id)),
                    (Some(Value::String(id)), Some(options), None) => {
                        let options = (!options.is_null()).then_some(options);
                        Ok(Self::ValidatorWithOptions(id, options))
                    }
                    (Some(Value::String(_)), Some(_), Some(_)) => Err(DefinitionShapeError(
                        "expected at most two elements: [validator, options]".into(),
                    )),
                    (Some(other), _, _) => Err(DefinitionShapeError(format!(
                        "validator reference must be a string, got {}",
                        json_kind(&other)
                    ))),
                    (None, _, _) => Err(DefinitionShapeError(
                        "empty array is not a definition".into(),
                    )),
                }
            }
            other => Err(DefinitionShapeError(format!(
                "expected null, a validator id, or [validator, options], got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Renders the canonical JSON form.
    pub fn to_json(&self) -> Value {
        match self {
            Self::None => Value::Null,
            Self::Validator(id) => Value::String(id.clone()),
            Self::ValidatorWithOptions(id, options) => Value::Array(vec![
                Value::String(id.clone()),
                options.clone().unwrap_or(Value::Null),
            ]),
        }
    }
}

impl TryFrom<Value> for PropertyDefinition {
    type Error = DefinitionShapeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_json(value)
    }
}

impl From<PropertyDefinition> for Value {
    fn from(definition: PropertyDefinition) -> Self {
        definition.to_json()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
