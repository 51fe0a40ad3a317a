use crate::{Options, Result, Validator};
use serde_json::Value;

/// Lets every value through unchanged.
///
/// This exists to show the shape of the contract. A property that needs no
/// validation should use a definition without a validator instead, so it is
/// obvious that nothing is being checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Anything;

impl Anything {
    /// Registry id of this validator.
    pub const ID: &'static str = "Anything";
}

impl Validator for Anything {
    fn validate(&self, value: Value, _options: &Options) -> Result<Value> {
        Ok(value)
    }
}
