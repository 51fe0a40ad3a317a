//! Error types for the collection engine.

use crate::definitions::PropertyKind;
use smartdata_validators::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CollectionError {
    #[error(
        "invalid collection '{collection}': no backing field for property definitions: {}",
        .fields.join(", ")
    )]
    MissingField {
        collection: String,
        fields: Vec<String>,
    },

    #[error("collection property does not exist: {0}")]
    UnknownProperty(String),

    #[error("invalid definition for '{property}': {reason}")]
    InvalidDefinitionShape { property: String, reason: String },

    #[error("invalid validator '{validator}' for '{property}': not a registered validator")]
    InvalidValidator { property: String, validator: String },

    #[error("invalid definition options for '{property}': must be null or a mapping")]
    InvalidOptions { property: String },

    #[error("validation failed for '{property}': {source}")]
    ValidationFailed {
        property: String,
        #[source]
        source: ValidationError,
    },

    #[error("property '{property}' is declared in both {existing} and {incoming} definitions")]
    DuplicateProperty {
        property: String,
        existing: PropertyKind,
        incoming: PropertyKind,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid engine config: {0}")]
    Config(String),
}

impl CollectionError {
    /// True for the failures raised by definition checking: bad shape,
    /// unresolvable validator, or malformed options.
    pub fn is_invalid_definition(&self) -> bool {
        matches!(
            self,
            Self::InvalidDefinitionShape { .. } | Self::InvalidValidator { .. } | Self::InvalidOptions { .. }
        )
    }

    /// The validator's own error, when this is a [`CollectionError::ValidationFailed`].
    pub fn validation_error(&self) -> Option<&ValidationError> {
        match self {
            Self::ValidationFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}
