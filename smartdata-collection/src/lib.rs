//! Property definition and validation dispatch for smartdata collections.
//!
//! A collection is a data object that declares three disjoint groups of
//! named properties, each optionally bound to a validator:
//! - [`PropertyDefinition`] — no validator, a validator, or a validator with options
//! - [`PropertyDefinitions`] — the required / require-one / optional tables
//! - [`Record`] / [`DataObject`] — the backing fields, declared explicitly
//! - [`Collection`] — a record bound to its definitions, with validated writes
//!
//! Construction fails fast: every defined property must have a backing
//! field, and every definition must reference a registered validator with
//! well-formed options. After that, [`Collection::set`] routes each write
//! through its validator.

mod collection;
mod config;
mod definition;
mod definitions;
mod error;
mod record;
mod schema;

pub use collection::{Collection, CollectionBuilder};
pub use config::{CollisionPolicy, EngineConfig};
pub use definition::{DefinitionShapeError, PropertyDefinition};
pub use definitions::{DefinitionTable, PropertyDefinitions, PropertyKind};
pub use error::CollectionError;
pub use record::{DataObject, DynamicRecord, Record, missing_field};
pub use schema::{SchemaDocument, parse_definition_table};

pub use smartdata_validators::{Anything, Options, ValidationError, Validator, ValidatorRegistry};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, CollectionError>;
