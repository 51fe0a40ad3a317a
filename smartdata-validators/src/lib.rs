//! Validator contract for smartdata collections.
//!
//! A validator is a stateless transform over a single property value:
//! - [`Validator`] — `(value, options) -> value`, or a [`ValidationError`]
//! - [`Options`] — the option mapping a property definition binds to its validator
//! - [`ValidatorRegistry`] — typed lookup from validator id to implementation
//! - [`Anything`] — the built-in pass-through validator
//!
//! Validators know nothing about the collection they serve. Attaching the
//! property name to a failure is the caller's job.

mod anything;
mod registry;
mod validator;

pub use anything::Anything;
pub use registry::ValidatorRegistry;
pub use validator::{Options, Validator};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Failure raised by a validator for a single value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("value rejected: {0}")]
    Rejected(String),

    #[error("invalid option '{option}': {reason}")]
    InvalidOption { option: String, reason: String },
}

impl ValidationError {
    /// Shorthand for a [`ValidationError::Rejected`] failure.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }
}
