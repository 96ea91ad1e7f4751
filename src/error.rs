//! Error types for the API
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;
use crate::serializer::SerializeError;
use crate::store::StoreError;
use crate::validation::Violation;

// == Api Error Enum ==
/// Every way a request can fail. Each variant is terminal for the request.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Caller lacks the role a mutating endpoint requires
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Request body could not be decoded
    #[error("{0}")]
    Decode(String),

    /// One or more field constraints failed
    #[error("Validation failed with {} violation(s)", .0.len())]
    Validation(Vec<Violation>),

    /// Path identity does not resolve to a record
    #[error("{0}")]
    NotFound(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            StoreError::Detached(_) | StoreError::ForeignKey(_) => {
                ApiError::Internal(err.to_string())
            }
        }
    }
}

impl From<SerializeError> for ApiError {
    fn from(err: SerializeError) -> Self {
        match err {
            SerializeError::Decode(_) => ApiError::Decode(err.to_string()),
            SerializeError::Encode(_) => ApiError::Internal(err.to_string()),
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, body) = match self {
            ApiError::Forbidden(_) => (StatusCode::FORBIDDEN, ErrorResponse::new(message)),
            ApiError::Decode(_) => (StatusCode::BAD_REQUEST, ErrorResponse::new(message)),
            ApiError::Validation(violations) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::with_violations("Validation failed", violations),
            ),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, ErrorResponse::new(message)),
            ApiError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new(message),
            ),
        };

        (status, Json(body)).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
