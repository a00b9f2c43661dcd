//! Pure function mapping domain errors to HTTP status codes.
//!
//! This is the single source of truth for the error taxonomy's transport
//! mapping; the boundary adapter calls it once per failed request.

use crate::error::Error;

/// Maps an [`Error`] to an HTTP status code.
///
/// - `Validation` -> 422 (Unprocessable Entity)
/// - `RecordNotFound` -> 404 (Not Found)
/// - `Repository` -> 417 (Expectation Failed)
/// - `Aws` -> 500 (Internal Server Error)
/// - `Image` -> 422 (same class as validation, given its cause)
pub fn error_to_status_code(error: &Error) -> u16 {
    match error {
        Error::Validation(_) => 422,
        Error::RecordNotFound { .. } => 404,
        Error::Repository(_) => 417,
        Error::Aws { .. } => 500,
        Error::Image(_) => 422,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_422() {
        let error = Error::validation("username", "not a valid string");
        assert_eq!(error_to_status_code(&error), 422);
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let error = Error::not_found("Comment", "c-1");
        assert_eq!(error_to_status_code(&error), 404);
    }

    #[test]
    fn test_repository_maps_to_417() {
        let error = Error::Repository("query failed".to_string());
        assert_eq!(error_to_status_code(&error), 417);
    }

    #[test]
    fn test_aws_maps_to_500() {
        let error = Error::aws("InternalServerError", "p-1");
        assert_eq!(error_to_status_code(&error), 500);
    }

    #[test]
    fn test_image_maps_to_422() {
        let error = Error::Image("invalid image file".to_string());
        assert_eq!(error_to_status_code(&error), 422);
    }
}
