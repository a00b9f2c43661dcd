//! Core domain layer for the inkpost blog backend.
//!
//! Pure data types and contracts only: entities, request payloads, events,
//! the error taxonomy with its HTTP mapping, and the repository traits.
//! All I/O lives in the backend adapters of the `inkpost` crate.

pub mod blog;
pub mod error;
pub mod http_mapping;
pub mod storage;
pub mod validate;

pub use error::{Error, FieldErrors, Result};
pub use http_mapping::error_to_status_code;
