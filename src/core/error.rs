//! Typed error handling for the bookstore service
//!
//! Every failure a handler can surface is a [`BookstoreError`]. Each variant
//! maps to one HTTP status and one stable error code, and renders as an
//! [`ErrorResponse`] body:
//!
//! ```json
//! {
//!   "timestamp": "2024-05-01T12:00:00Z",
//!   "code": "RESOURCE_NOT_FOUND",
//!   "message": "No records found for this ID!",
//!   "details": "uri=/person/42"
//! }
//! ```
//!
//! `details` is filled in by [`crate::server::middleware::attach_error_details`]
//! once the request path is known.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// Result alias used across services and handlers
pub type BookstoreResult<T> = Result<T, BookstoreError>;

type BoxedSource = Box<dyn std::error::Error + Send + Sync + 'static>;

pub const REQUIRED_OBJECT_IS_NULL: &str = "It is not allowed to persist a null object!";
pub const NO_RECORDS_FOUND: &str = "No records found for this ID!";
pub const INVALID_FILE_FORMAT: &str = "Invalid file format!";

#[derive(Debug, Error)]
pub enum BookstoreError {
    /// A required payload was absent
    #[error("{0}")]
    InvalidArgument(String),

    /// No record exists for the given identifier
    #[error("{0}")]
    NotFound(String),

    /// Malformed request, unsupported format or empty upload
    #[error("{0}")]
    BadRequest(String),

    /// A stored file could not be located
    #[error("{0}")]
    FileNotFound(String),

    /// File staging or (de)coding failed
    #[error("{message}")]
    Storage {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// Missing or invalid credentials
    #[error("{0}")]
    Unauthenticated(String),

    /// Credentials were valid but the request is refused
    #[error("{0}")]
    Unauthorized(String),

    /// Failure reported by a persistence backend
    #[error(transparent)]
    Store(#[from] anyhow::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl BookstoreError {
    pub fn required_object_is_null() -> Self {
        Self::InvalidArgument(REQUIRED_OBJECT_IS_NULL.to_string())
    }

    pub fn not_found() -> Self {
        Self::NotFound(NO_RECORDS_FOUND.to_string())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn invalid_file_format() -> Self {
        Self::BadRequest(INVALID_FILE_FORMAT.to_string())
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
            source: None,
        }
    }

    pub fn storage_with<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Storage {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidArgument(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) | Self::FileNotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            Self::Unauthorized(_) => StatusCode::FORBIDDEN,
            Self::Storage { .. } | Self::Store(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "REQUIRED_OBJECT_IS_NULL",
            Self::NotFound(_) => "RESOURCE_NOT_FOUND",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::FileNotFound(_) => "FILE_NOT_FOUND",
            Self::Storage { .. } => "FILE_STORAGE_ERROR",
            Self::Unauthenticated(_) => "UNAUTHENTICATED",
            Self::Unauthorized(_) => "FORBIDDEN",
            Self::Store(_) => "STORE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        let message = match self {
            // Backend messages can leak connection strings and SQL
            Self::Store(_) => "Unexpected persistence failure".to_string(),
            other => other.to_string(),
        };
        ErrorResponse {
            timestamp: Utc::now(),
            code: self.error_code().to_string(),
            message,
            details: None,
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub timestamp: DateTime<Utc>,
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Request description, e.g. `uri=/person/1`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for BookstoreError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = ?self, "request failed");
        } else {
            tracing::debug!(error = %self, status = %status, "request rejected");
        }

        let body = self.to_response();
        let mut response = (status, Json(body.clone())).into_response();
        // Picked up by the error-details middleware to add the request uri.
        response.extensions_mut().insert(body);
        response
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_json::Error> for BookstoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::BadRequest(format!("Invalid JSON: {}", err))
    }
}

impl From<serde_yaml::Error> for BookstoreError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::BadRequest(format!("Invalid YAML: {}", err))
    }
}

impl From<std::io::Error> for BookstoreError {
    fn from(err: std::io::Error) -> Self {
        Self::storage_with("File system operation failed", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod status_code_tests {
        use super::*;

        #[test]
        fn test_required_object_is_bad_request() {
            let err = BookstoreError::required_object_is_null();
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
            assert_eq!(err.error_code(), "REQUIRED_OBJECT_IS_NULL");
            assert_eq!(err.to_string(), REQUIRED_OBJECT_IS_NULL);
        }

        #[test]
        fn test_not_found() {
            let err = BookstoreError::not_found();
            assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
            assert_eq!(err.error_code(), "RESOURCE_NOT_FOUND");
        }

        #[test]
        fn test_auth_errors() {
            assert_eq!(
                BookstoreError::Unauthenticated("x".into()).status_code(),
                StatusCode::UNAUTHORIZED
            );
            assert_eq!(
                BookstoreError::Unauthorized("x".into()).status_code(),
                StatusCode::FORBIDDEN
            );
        }

        #[test]
        fn test_storage_and_store_are_server_errors() {
            let io = std::io::Error::other("disk full");
            let err = BookstoreError::storage_with("Could not store file", io);
            assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
            assert!(std::error::Error::source(&err).is_some());

            let err = BookstoreError::from(anyhow::anyhow!("connection refused"));
            assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(err.error_code(), "STORE_ERROR");
        }
    }

    mod response_tests {
        use super::*;

        #[test]
        fn test_store_message_is_masked() {
            let err = BookstoreError::from(anyhow::anyhow!("password=hunter2"));
            let body = err.to_response();
            assert!(!body.message.contains("hunter2"));
        }

        #[test]
        fn test_into_response_carries_body_extension() {
            let response = BookstoreError::invalid_file_format().into_response();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let body = response.extensions().get::<ErrorResponse>().unwrap();
            assert_eq!(body.message, INVALID_FILE_FORMAT);
            assert!(body.details.is_none());
        }
    }
}
