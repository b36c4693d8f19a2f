//! Request payload validation.
//!
//! # Responsibilities
//! - Semantic validation of deserialized request values (serde handles syntactic)
//! - Run on write-class payloads after deserialization, before dispatch
//!
//! # Design Decisions
//! - Validation is a pure function: &T -> Result<(), ValidationError>
//! - A failed validation is a client error, distinct from a malformed payload
//! - Types with no structural constraints opt in with an empty impl

use thiserror::Error;

/// A semantic constraint violation on a deserialized request value.
#[derive(Debug, Clone, Error)]
#[error("validation failed on field '{field}': {message}")]
pub struct ValidationError {
    /// Name of the offending field.
    pub field: &'static str,
    /// Client-safe description of the violation.
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Structural and semantic constraints attached to a request type.
///
/// The default implementation accepts everything, so unconstrained types
/// only need `impl Validate for MyRequest {}`.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}
