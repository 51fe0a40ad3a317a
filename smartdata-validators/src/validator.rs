use crate::Result;
use serde_json::{Map, Value};

/// Option mapping passed to a validator alongside the value.
pub type Options = Map<String, Value>;

/// A stateless check or transform applied to a property value before it is
/// stored.
///
/// Implementations must be pure with respect to the collection: the same
/// `(value, options)` pair always yields the same outcome, and nothing
/// outside the return value is touched.
///
/// Any `Fn(Value, &Options) -> Result<Value>` closure is a validator.
pub trait Validator: Send + Sync {
    /// Returns the value to store, possibly coerced, or rejects it.
    fn validate(&self, value: Value, options: &Options) -> Result<Value>;
}

impl<F> Validator for F
where
    F: Fn(Value, &Options) -> Result<Value> + Send + Sync,
{
    fn validate(&self, value: Value, options: &Options) -> Result<Value> {
        self(value, options)
    }
}
