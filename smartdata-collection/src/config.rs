//! Engine configuration, read from a TOML file such as `smartdata.toml`:
//!
//! ```toml
//! collision_policy = "reject"
//! ```

use crate::{CollectionError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// What to do when a property name is declared in more than one table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    #[default]
    /// Accept the table and log a warning. The entry from the earliest table
    /// (required, then require-one, then optional) takes precedence.
    Allow,
    /// Fail the table replacement with `DuplicateProperty`.
    Reject,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    #[serde(default)]
    pub collision_policy: CollisionPolicy,
}

impl EngineConfig {
    /// Parses a config document, failing on unknown keys or bad values.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| CollectionError::Config(e.to_string()))
    }

    /// Loads config from `path` if it exists.
    /// Falls back to the defaults with a warning on read or parse errors.
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("No engine config found at {:?}, using defaults", path);
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(config) => {
                    info!("Loaded engine config from {:?}", path);
                    config
                }
                Err(e) => {
                    warn!("Failed to parse engine config {:?}: {}. Using defaults.", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read engine config {:?}: {}", path, e);
                Self::default()
            }
        }
    }
}
