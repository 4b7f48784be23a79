//! Error types for the gateway
//!
//! Maps validation and store failures onto HTTP responses using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;
use crate::store::StoreError;

// == Api Error Enum ==
/// Unified error type returned by the request handlers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Malformed or incomplete request
    #[error("{0}")]
    InvalidRequest(String),

    /// Key absent or expired
    #[error("Key not found")]
    NotFound,

    /// Any failure reported by the store during a data operation
    #[error("Redis error: {0}")]
    Store(String),

    /// Failure inside the gateway itself
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Store(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ApiError::NotFound,
            StoreError::Connection(detail) | StoreError::Operation(detail) => {
                ApiError::Store(detail)
            }
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the request handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
