//! Client-side error type

use shared::error::{AppError, ErrorCode, FieldError};
use thiserror::Error;

/// Errors produced by the REST client
#[derive(Debug, Error)]
pub enum ClientError {
    /// The backend answered with a structured error envelope
    #[error("{message}")]
    Api {
        code: ErrorCode,
        message: String,
        /// Field-level validation errors, when the backend provides them
        errors: Vec<FieldError>,
    },

    /// Network-level failure (connect, timeout, TLS, ...)
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body could not be decoded
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// Field-level errors carried by this error (empty for transport/decode)
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::Api { errors, .. } => errors,
            _ => &[],
        }
    }

    /// Whether this is a structured validation rejection
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Api {
                code: ErrorCode::ValidationFailed | ErrorCode::RequiredField,
                ..
            }
        )
    }

    /// Error code, when the backend provided one
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl From<AppError> for ClientError {
    fn from(err: AppError) -> Self {
        Self::Api {
            code: err.code,
            message: err.message,
            errors: err.errors,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::ApiResponse;

    #[test]
    fn test_server_rejection_maps_to_api_error() {
        let json = r#"{
            "code": 2,
            "message": "Validation failed",
            "errors": [{"field": "supplier_id", "message": "required"}]
        }"#;
        let body: ApiResponse<i64> = serde_json::from_str(json).unwrap();
        let err: ClientError = body.into_error().into();

        assert!(err.is_validation());
        assert_eq!(err.field_errors().len(), 1);
        assert_eq!(err.field_errors()[0].field, "supplier_id");
        assert_eq!(err.field_errors()[0].message, "required");
    }

    #[test]
    fn test_non_validation_error_has_no_field_errors() {
        let err: ClientError = AppError::not_found("Order").into();
        assert!(!err.is_validation());
        assert!(err.field_errors().is_empty());
        assert_eq!(err.code(), Some(ErrorCode::NotFound));
    }
}
