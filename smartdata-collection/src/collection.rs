//! Collection lifecycle: a [`CollectionBuilder`] collects definitions, and
//! building it checks them against the backing record to produce a ready
//! [`Collection`].

use crate::config::EngineConfig;
use crate::definitions::{DefinitionTable, PropertyDefinitions, PropertyKind};
use crate::record::{DataObject, Record};
use crate::{CollectionError, Result};
use serde_json::Value;
use smartdata_validators::ValidatorRegistry;
use std::sync::Arc;
use tracing::debug;

/// A collection that has not been checked against its backing record yet.
#[derive(Debug)]
pub struct CollectionBuilder<R> {
    record: R,
    definitions: PropertyDefinitions,
}

impl<R: Record> CollectionBuilder<R> {
    pub fn new(record: R, registry: Arc<ValidatorRegistry>) -> Self {
        Self {
            record,
            definitions: PropertyDefinitions::new(registry),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.definitions = self.definitions.with_config(config);
        self
    }

    pub fn required(mut self, table: DefinitionTable) -> Result<Self> {
        self.definitions.set_required_property_definitions(table)?;
        Ok(self)
    }

    pub fn require_one(mut self, table: DefinitionTable) -> Result<Self> {
        self.definitions.set_require_one_property_definitions(table)?;
        Ok(self)
    }

    pub fn optional(mut self, table: DefinitionTable) -> Result<Self> {
        self.definitions.set_optional_property_definitions(table)?;
        Ok(self)
    }

    pub fn definitions(&self) -> &PropertyDefinitions {
        &self.definitions
    }

    pub fn definitions_mut(&mut self) -> &mut PropertyDefinitions {
        &mut self.definitions
    }

    /// Checks that every defined property has a backing field, then checks
    /// every definition and the collision policy once more.
    pub fn build(self) -> Result<Collection<R>> {
        Collection::construct(self.record, self.definitions)
    }
}

/// A data object bound to its property definitions.
///
/// [`Collection::set`] is the validated write path. Writes through
/// [`Collection::record_mut`] bypass validation.
#[derive(Debug)]
pub struct Collection<R> {
    record: R,
    definitions: PropertyDefinitions,
}

impl<R: DataObject> Collection<R> {
    /// Constructs a collection for a record that declares its own schema.
    pub fn new(record: R, registry: Arc<ValidatorRegistry>) -> Result<Self> {
        Self::with_config(record, registry, EngineConfig::default())
    }

    pub fn with_config(record: R, registry: Arc<ValidatorRegistry>, config: EngineConfig) -> Result<Self> {
        let mut definitions = PropertyDefinitions::new(registry).with_config(config);
        record.define(&mut definitions)?;
        Self::construct(record, definitions)
    }
}

impl<R: Record> Collection<R> {
    pub fn builder(record: R, registry: Arc<ValidatorRegistry>) -> CollectionBuilder<R> {
        CollectionBuilder::new(record, registry)
    }

    fn construct(record: R, definitions: PropertyDefinitions) -> Result<Self> {
        let merged = definitions.all_property_definitions();
        let missing: Vec<String> = merged
            .keys()
            .filter(|name| !record.has_field(name))
            .cloned()
            .collect();

        if !missing.is_empty() {
            return Err(CollectionError::MissingField {
                collection: record.collection_name().to_string(),
                fields: missing,
            });
        }

        definitions.validate_all()?;

        debug!(
            collection = record.collection_name(),
            properties = merged.len(),
            "Collection ready"
        );
        Ok(Self { record, definitions })
    }

    /// Validates `value` against the definition of `name` and stores the
    /// result in the backing field.
    pub fn set(&mut self, name: &str, value: Value) -> Result<()> {
        let stored = self.definitions.apply(name, value)?;
        self.record.write_field(name, stored)
    }

    /// Current value of a defined property.
    pub fn get(&self, name: &str) -> Result<Option<Value>> {
        self.definitions.property_definition(name)?;
        Ok(self.record.read_field(name))
    }

    pub fn set_required_property_definitions(&mut self, table: DefinitionTable) -> Result<()> {
        self.definitions.set_required_property_definitions(table)
    }

    pub fn set_require_one_property_definitions(&mut self, table: DefinitionTable) -> Result<()> {
        self.definitions.set_require_one_property_definitions(table)
    }

    pub fn set_optional_property_definitions(&mut self, table: DefinitionTable) -> Result<()> {
        self.definitions.set_optional_property_definitions(table)
    }

    pub fn property_kind(&self, name: &str) -> Result<PropertyKind> {
        self.definitions.property_kind(name)
    }

    pub fn definitions(&self) -> &PropertyDefinitions {
        &self.definitions
    }

    pub fn record(&self) -> &R {
        &self.record
    }

    pub fn record_mut(&mut self) -> &mut R {
        &mut self.record
    }

    pub fn into_record(self) -> R {
        self.record
    }
}
