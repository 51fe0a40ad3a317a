//! The three definition tables of a collection and everything that reads
//! them: merging, lookup, definition checks, and validator dispatch.
//!
//! Tables are declarative. Whether a required property is actually present,
//! or exactly one require-one property is set, is left to the owning data
//! object; this module only keeps the books and validates values.

use crate::config::{CollisionPolicy, EngineConfig};
use crate::definition::PropertyDefinition;
use crate::{CollectionError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use smartdata_validators::{Options, Validator, ValidatorRegistry};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Property name to definition.
pub type DefinitionTable = BTreeMap<String, PropertyDefinition>;

static EMPTY_TABLE: DefinitionTable = BTreeMap::new();

/// Which table a property is declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    Required,
    RequireOne,
    Optional,
}

impl PropertyKind {
    /// Tables in merge precedence order.
    pub const ALL: [PropertyKind; 3] = [Self::Required, Self::RequireOne, Self::Optional];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::RequireOne => "require-one",
            Self::Optional => "optional",
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Required, require-one, and optional definition tables, checked against a
/// validator registry.
///
/// A table that was never set reads as empty. Setting a table is
/// replace-or-reject: every definition is checked first, and on the first
/// failure the previous contents stay in place.
#[derive(Debug, Clone)]
pub struct PropertyDefinitions {
    registry: Arc<ValidatorRegistry>,
    config: EngineConfig,
    required: Option<DefinitionTable>,
    require_one: Option<DefinitionTable>,
    optional: Option<DefinitionTable>,
}

impl PropertyDefinitions {
    pub fn new(registry: Arc<ValidatorRegistry>) -> Self {
        Self {
            registry,
            config: EngineConfig::default(),
            required: None,
            require_one: None,
            optional: None,
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &ValidatorRegistry {
        &self.registry
    }

    // ── Table setters ────────────────────────────────────────────

    pub fn set_required_property_definitions(&mut self, table: DefinitionTable) -> Result<()> {
        self.replace(PropertyKind::Required, table)
    }

    pub fn set_require_one_property_definitions(&mut self, table: DefinitionTable) -> Result<()> {
        self.replace(PropertyKind::RequireOne, table)
    }

    pub fn set_optional_property_definitions(&mut self, table: DefinitionTable) -> Result<()> {
        self.replace(PropertyKind::Optional, table)
    }

    /// Replaces the table for `kind` after checking every definition in it.
    pub fn replace(&mut self, kind: PropertyKind, table: DefinitionTable) -> Result<()> {
        self.validate_definitions(&table)?;
        self.check_collisions(kind, &table)?;

        debug!(table = %kind, properties = table.len(), "Replaced property definition table");
        *self.slot_mut(kind) = Some(table);
        Ok(())
    }

    // ── Table getters ────────────────────────────────────────────

    pub fn required_property_definitions(&self) -> &DefinitionTable {
        self.table(PropertyKind::Required)
    }

    pub fn require_one_property_definitions(&self) -> &DefinitionTable {
        self.table(PropertyKind::RequireOne)
    }

    pub fn optional_property_definitions(&self) -> &DefinitionTable {
        self.table(PropertyKind::Optional)
    }

    /// The table for `kind`, or an empty table if it was never set.
    pub fn table(&self, kind: PropertyKind) -> &DefinitionTable {
        self.slot(kind).as_ref().unwrap_or(&EMPTY_TABLE)
    }

    /// Union of all three tables. A name present in several tables keeps the
    /// entry from the earliest one.
    pub fn all_property_definitions(&self) -> DefinitionTable {
        let mut merged = DefinitionTable::new();
        for kind in PropertyKind::ALL {
            for (name, definition) in self.table(kind) {
                merged
                    .entry(name.clone())
                    .or_insert_with(|| definition.clone());
            }
        }
        merged
    }

    // ── Lookup ───────────────────────────────────────────────────

    pub fn property_definition(&self, name: &str) -> Result<&PropertyDefinition> {
        self.lookup(name).map(|(_, definition)| definition)
    }

    /// The table a property's effective definition comes from.
    pub fn property_kind(&self, name: &str) -> Result<PropertyKind> {
        self.lookup(name).map(|(kind, _)| kind)
    }

    /// The validator id bound to `name`, or `None` when it has no validator.
    pub fn property_definition_validator(&self, name: &str) -> Result<Option<&str>> {
        Ok(self.property_definition(name)?.validator_id())
    }

    /// The options bound to `name`. Empty unless the definition carries a
    /// non-empty mapping.
    pub fn property_definition_options(&self, name: &str) -> Result<Options> {
        definition_options(name, self.property_definition(name)?)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_ok()
    }

    fn lookup(&self, name: &str) -> Result<(PropertyKind, &PropertyDefinition)> {
        PropertyKind::ALL
            .into_iter()
            .find_map(|kind| self.table(kind).get(name).map(|d| (kind, d)))
            .ok_or_else(|| CollectionError::UnknownProperty(name.to_string()))
    }

    // ── Dispatch ─────────────────────────────────────────────────

    /// Runs `value` through the validator bound to `name` and returns what
    /// should be stored. Without a validator the value is returned as-is.
    pub fn apply(&self, name: &str, value: Value) -> Result<Value> {
        let definition = self.property_definition(name)?;
        let Some(id) = definition.validator_id() else {
            return Ok(value);
        };

        let validator = self.resolve_validator(name, id)?;
        let options = definition_options(name, definition)?;
        validator
            .validate(value, &options)
            .map_err(|source| CollectionError::ValidationFailed {
                property: name.to_string(),
                source,
            })
    }

    fn resolve_validator(&self, property: &str, id: &str) -> Result<&dyn Validator> {
        self.registry
            .get(id)
            .ok_or_else(|| CollectionError::InvalidValidator {
                property: property.to_string(),
                validator: id.to_string(),
            })
    }

    // ── Definition checks ────────────────────────────────────────

    /// Checks every definition across all tables. Under
    /// [`CollisionPolicy::Reject`] also fails if any name appears in more
    /// than one table.
    pub fn validate_all(&self) -> Result<()> {
        self.validate_definitions(&self.all_property_definitions())?;
        if self.config.collision_policy == CollisionPolicy::Reject {
            self.reject_duplicates()?;
        }
        Ok(())
    }

    fn reject_duplicates(&self) -> Result<()> {
        for (i, existing) in PropertyKind::ALL.into_iter().enumerate() {
            let earlier = self.table(existing);
            for incoming in PropertyKind::ALL.into_iter().skip(i + 1) {
                if let Some(name) = self.table(incoming).keys().find(|name| earlier.contains_key(*name)) {
                    return Err(CollectionError::DuplicateProperty {
                        property: name.clone(),
                        existing,
                        incoming,
                    });
                }
            }
        }
        Ok(())
    }

    /// Checks each definition in `table`, stopping at the first failure.
    pub fn validate_definitions(&self, table: &DefinitionTable) -> Result<()> {
        table
            .iter()
            .try_for_each(|(name, definition)| self.validate_definition(name, definition))
    }

    pub fn validate_definition(&self, property: &str, definition: &PropertyDefinition) -> Result<()> {
        match definition {
            PropertyDefinition::None => Ok(()),
            PropertyDefinition::Validator(id) => self.resolve_validator(property, id).map(|_| ()),
            PropertyDefinition::ValidatorWithOptions(id, options) => {
                self.resolve_validator(property, id)?;
                check_options(property, options.as_ref())
            }
        }
    }

    fn check_collisions(&self, incoming: PropertyKind, table: &DefinitionTable) -> Result<()> {
        for existing in PropertyKind::ALL.into_iter().filter(|k| *k != incoming) {
            let other = self.table(existing);
            for name in table.keys().filter(|name| other.contains_key(*name)) {
                match self.config.collision_policy {
                    CollisionPolicy::Reject => {
                        return Err(CollectionError::DuplicateProperty {
                            property: name.clone(),
                            existing,
                            incoming,
                        });
                    }
                    CollisionPolicy::Allow => {
                        let winner = if existing < incoming { existing } else { incoming };
                        warn!(
                            property = %name,
                            %existing,
                            %incoming,
                            "Property declared in more than one definition table; {} entry takes precedence",
                            winner
                        );
                    }
                }
            }
        }
        Ok(())
    }

    /// Same registry and config, with every table unset.
    pub(crate) fn without_tables(&self) -> Self {
        Self::new(Arc::clone(&self.registry)).with_config(self.config.clone())
    }

    fn slot(&self, kind: PropertyKind) -> &Option<DefinitionTable> {
        match kind {
            PropertyKind::Required => &self.required,
            PropertyKind::RequireOne => &self.require_one,
            PropertyKind::Optional => &self.optional,
        }
    }

    fn slot_mut(&mut self, kind: PropertyKind) -> &mut Option<DefinitionTable> {
        match kind {
            PropertyKind::Required => &mut self.required,
            PropertyKind::RequireOne => &mut self.require_one,
            PropertyKind::Optional => &mut self.optional,
        }
    }
}

/// Options must be absent, `null`, or a mapping. An empty array is read as
/// an empty mapping.
fn check_options(property: &str, options: Option<&Value>) -> Result<()> {
    match options {
        None | Some(Value::Null) | Some(Value::Object(_)) => Ok(()),
        Some(Value::Array(items)) if items.is_empty() => Ok(()),
        Some(_) => Err(CollectionError::InvalidOptions {
            property: property.to_string(),
        }),
    }
}

/// Extracts options at read time. Re-checks the options slot even though the
/// setters already did.
fn definition_options(property: &str, definition: &PropertyDefinition) -> Result<Options> {
    let PropertyDefinition::ValidatorWithOptions(_, options) = definition else {
        return Ok(Options::new());
    };

    check_options(property, options.as_ref())?;
    match options {
        Some(Value::Object(map)) => Ok(map.clone()),
        _ => Ok(Options::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn read_time_options_check_rejects_bare_string() {
        let definition = PropertyDefinition::ValidatorWithOptions("Anything".into(), Some(json!("not-a-mapping")));
        let err = definition_options("prop", &definition).unwrap_err();
        assert!(matches!(err, CollectionError::InvalidOptions { ref property } if property == "prop"));
    }

    #[test]
    fn read_time_options_check_rejects_numbers_and_non_empty_arrays() {
        for bad in [json!(3), json!(["allowNull"]), json!(true)] {
            let definition = PropertyDefinition::ValidatorWithOptions("Anything".into(), Some(bad));
            assert!(definition_options("prop", &definition).is_err());
        }
    }

    #[test]
    fn read_time_options_for_shapes_without_options() {
        assert!(definition_options("p", &PropertyDefinition::None).unwrap().is_empty());
        assert!(definition_options("p", &PropertyDefinition::validator("Anything")).unwrap().is_empty());
        let no_options = PropertyDefinition::ValidatorWithOptions("Anything".into(), None);
        assert!(definition_options("p", &no_options).unwrap().is_empty());
        let empty_array = PropertyDefinition::ValidatorWithOptions("Anything".into(), Some(json!([])));
        assert!(definition_options("p", &empty_array).unwrap().is_empty());
    }

    #[test]
    fn property_kind_order_matches_precedence() {
        assert!(PropertyKind::Required < PropertyKind::RequireOne);
        assert!(PropertyKind::RequireOne < PropertyKind::Optional);
    }
}
