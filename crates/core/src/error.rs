use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error as ThisError;

/// Per-field validation messages, keyed by field name.
///
/// Ordered so that error bodies are deterministic across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-field errors, e.g. entity invariant failures.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(field, message);
        errors
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Errors that can occur anywhere in the validation/persistence pipeline.
///
/// Every failure kind propagates unmodified to the transport boundary,
/// which maps it to a status code exactly once (see [`crate::http_mapping`]).
#[derive(Debug, ThisError, Clone, PartialEq, Eq)]
pub enum Error {
    /// Inbound payload failed schema validation or an entity invariant.
    #[error("validation failed: {0}")]
    Validation(FieldErrors),
    /// A point lookup by id returned nothing.
    #[error("{entity} with id {id} was not found")]
    RecordNotFound { entity: &'static str, id: String },
    /// The backend reported a non-success status for a read that is not
    /// itself a "not found".
    #[error("repository error: {0}")]
    Repository(String),
    /// A backend client failure during a mutating, upload, publish or send
    /// operation; wraps the provider error code and the affected entity id.
    #[error("AWS error {code} for {id}")]
    Aws { code: String, id: String },
    /// Malformed or absent image payload.
    #[error("image error: {0}")]
    Image(String),
}

impl Error {
    /// Validation failure for a single named field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Validation(FieldErrors::single(field, message))
    }

    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Error::RecordNotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn aws(code: impl Into<String>, id: impl Into<String>) -> Self {
        Error::Aws {
            code: code.into(),
            id: id.into(),
        }
    }
}

/// Result type used across the domain and repository layers.
pub type Result<T> = std::result::Result<T, Error>;
