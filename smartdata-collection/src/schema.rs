//! JSON schema documents for collections.
//!
//! ```json
//! {
//!   "required":    { "id": null },
//!   "require_one": { "email": "Anything", "phone": "Anything" },
//!   "optional":    { "tag": ["Anything", { "allowNull": true }] }
//! }
//! ```
//!
//! `requireOne` is accepted as an alias for `require_one`.

use crate::definition::PropertyDefinition;
use crate::definitions::{DefinitionTable, PropertyDefinitions, PropertyKind};
use crate::{CollectionError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaDocument {
    #[serde(default)]
    pub required: DefinitionTable,
    #[serde(default, alias = "requireOne")]
    pub require_one: DefinitionTable,
    #[serde(default)]
    pub optional: DefinitionTable,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSchema {
    #[serde(default)]
    required: Map<String, Value>,
    #[serde(default, alias = "requireOne")]
    require_one: Map<String, Value>,
    #[serde(default)]
    optional: Map<String, Value>,
}

impl SchemaDocument {
    /// Parses a schema document. Definitions with an unrecognised shape are
    /// reported as `InvalidDefinitionShape` naming the property.
    pub fn from_json_str(contents: &str) -> Result<Self> {
        let raw: RawSchema = serde_json::from_str(contents)?;
        Ok(Self {
            required: table_from_map(raw.required)?,
            require_one: table_from_map(raw.require_one)?,
            optional: table_from_map(raw.optional)?,
        })
    }

    /// Snapshot of the tables currently held by `definitions`.
    pub fn from_definitions(definitions: &PropertyDefinitions) -> Self {
        Self {
            required: definitions.required_property_definitions().clone(),
            require_one: definitions.require_one_property_definitions().clone(),
            optional: definitions.optional_property_definitions().clone(),
        }
    }

    /// Replaces all three tables of `definitions` at once. Collisions are
    /// judged against the document's own tables, not the ones it replaces.
    /// If any table is rejected, `definitions` is left unchanged.
    pub fn apply_to(self, definitions: &mut PropertyDefinitions) -> Result<()> {
        let mut next = definitions.without_tables();
        next.replace(PropertyKind::Required, self.required)?;
        next.replace(PropertyKind::RequireOne, self.require_one)?;
        next.replace(PropertyKind::Optional, self.optional)?;
        *definitions = next;
        Ok(())
    }

    pub fn to_json_string_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Parses a JSON object of `name -> definition` into a table.
pub fn parse_definition_table(value: Value) -> Result<DefinitionTable> {
    match value {
        Value::Object(map) => table_from_map(map),
        _ => Err(CollectionError::InvalidDefinitionShape {
            property: String::new(),
            reason: "definition table must be an object".into(),
        }),
    }
}

fn table_from_map(map: Map<String, Value>) -> Result<DefinitionTable> {
    map.into_iter()
        .map(|(name, value)| match PropertyDefinition::from_json(value) {
            Ok(definition) => Ok((name, definition)),
            Err(e) => Err(CollectionError::InvalidDefinitionShape {
                property: name,
                reason: e.reason().to_string(),
            }),
        })
        .collect()
}
