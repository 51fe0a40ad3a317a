//! Backing storage for collection properties.
//!
//! A data object declares the fields it backs explicitly through
//! [`Record::field_names`]; construction of a collection checks every defined
//! property name against that declaration.

use crate::definitions::PropertyDefinitions;
use crate::{CollectionError, Result};
use serde_json::Value;
use std::collections::BTreeMap;

/// A data object with named, writable fields.
pub trait Record {
    /// Names of the writable fields this object backs.
    fn field_names(&self) -> Vec<&str>;

    /// Whether this object backs a writable field called `name`.
    fn has_field(&self, name: &str) -> bool {
        self.field_names().contains(&name)
    }

    /// Stores `value` in the field called `name`.
    ///
    /// Implementations return [`CollectionError::MissingField`] for names they
    /// do not back, and may return [`CollectionError::Serialization`] when the
    /// value does not fit the field's type.
    fn write_field(&mut self, name: &str, value: Value) -> Result<()>;

    /// Current value of the field called `name`.
    fn read_field(&self, name: &str) -> Option<Value>;

    /// Name used in construction errors.
    fn collection_name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// A [`Record`] that declares its own schema.
///
/// `define` runs once per construction, before backing fields are checked.
pub trait DataObject: Record {
    fn define(&self, definitions: &mut PropertyDefinitions) -> Result<()>;
}

/// Builds the error for a single undeclared field.
pub fn missing_field(record: &(impl Record + ?Sized), name: &str) -> CollectionError {
    CollectionError::MissingField {
        collection: record.collection_name().to_string(),
        fields: vec![name.to_string()],
    }
}

/// A map-backed record whose field set is fixed when it is built.
/// Every field starts out as `null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DynamicRecord {
    name: String,
    fields: BTreeMap<String, Value>,
}

impl DynamicRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn with_fields<I, S>(name: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut record = Self::new(name);
        for field in fields {
            record.add_field(field);
        }
        record
    }

    /// Declares a field. Existing values are left alone.
    pub fn add_field(&mut self, name: impl Into<String>) {
        self.fields.entry(name.into()).or_insert(Value::Null);
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

impl Record for DynamicRecord {
    fn field_names(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }

    fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    fn write_field(&mut self, name: &str, value: Value) -> Result<()> {
        match self.fields.get_mut(name) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(missing_field(self, name)),
        }
    }

    fn read_field(&self, name: &str) -> Option<Value> {
        self.fields.get(name).cloned()
    }

    fn collection_name(&self) -> &str {
        &self.name
    }
}
