//! Typed lookup from validator id to implementation.
//!
//! Property definitions name their validator by id. An id "satisfies the
//! contract" exactly when it resolves in the registry the definitions are
//! checked against.

use crate::{Anything, Validator};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Set of validators addressable by id.
#[derive(Clone, Default)]
pub struct ValidatorRegistry {
    validators: HashMap<String, Arc<dyn Validator>>,
}

impl ValidatorRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in validators.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Anything::ID, Anything);
        registry
    }

    /// Registers `validator` under `id`, replacing any previous entry.
    /// Returns the replaced validator, if any.
    pub fn register<V>(&mut self, id: impl Into<String>, validator: V) -> Option<Arc<dyn Validator>>
    where
        V: Validator + 'static,
    {
        self.register_shared(id, Arc::new(validator))
    }

    /// Registers an already shared validator under `id`.
    pub fn register_shared(
        &mut self,
        id: impl Into<String>,
        validator: Arc<dyn Validator>,
    ) -> Option<Arc<dyn Validator>> {
        self.validators.insert(id.into(), validator)
    }

    /// Looks up the validator registered under `id`.
    pub fn get(&self, id: &str) -> Option<&dyn Validator> {
        self.validators.get(id).map(|v| v.as_ref())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.validators.contains_key(id)
    }

    /// Registered ids in sorted order.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.validators.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorRegistry")
            .field("ids", &self.ids())
            .finish()
    }
}
