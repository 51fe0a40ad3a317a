#![allow(dead_code)]

use serde_json::{Value, json};
use smartdata_collection::{
    DefinitionTable, Options, PropertyDefinitions, ValidationError, ValidatorRegistry,
    parse_definition_table,
};
use std::sync::Arc;

/// Builds a table from its JSON form.
pub fn table(value: Value) -> DefinitionTable {
    parse_definition_table(value).unwrap()
}

pub fn options(value: Value) -> Options {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

/// Upper-cases strings; `{"trim": true}` trims them first.
fn uppercase(value: Value, options: &Options) -> Result<Value, ValidationError> {
    let s = value
        .as_str()
        .ok_or_else(|| ValidationError::rejected("expected a string"))?;
    let s = if options.get("trim").and_then(Value::as_bool).unwrap_or(false) {
        s.trim()
    } else {
        s
    };
    Ok(json!(s.to_uppercase()))
}

/// Rejects strings longer than the `max` option.
fn max_length(value: Value, options: &Options) -> Result<Value, ValidationError> {
    let max = options.get("max").and_then(Value::as_u64).unwrap_or(u64::MAX);
    match value.as_str() {
        Some(s) if s.chars().count() as u64 > max => {
            Err(ValidationError::rejected(format!("longer than {max} characters")))
        }
        _ => Ok(value),
    }
}

/// Builtins plus `Uppercase` and `MaxLength`.
pub fn registry() -> Arc<ValidatorRegistry> {
    let mut registry = ValidatorRegistry::with_builtins();
    registry.register("Uppercase", uppercase);
    registry.register("MaxLength", max_length);
    Arc::new(registry)
}

pub fn definitions() -> PropertyDefinitions {
    PropertyDefinitions::new(registry())
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("smartdata_collection=debug")
        .with_test_writer()
        .try_init();
}
