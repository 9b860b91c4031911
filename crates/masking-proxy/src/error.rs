//! Error types for the masking proxy.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ride_store::StoreError;
use serde::Serialize;
use thiserror::Error;

/// Relay error taxonomy.
///
/// Unknown parties and pool exhaustion are expected outcomes surfaced to
/// the caller; storage failures abort the request. Delivery failures never
/// appear here: the notifier returns its own result which callers inspect
/// and log (see [`crate::notify`]).
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Unknown customer: {0}")]
    UnknownCustomer(u64),

    #[error("Unknown driver: {0}")]
    UnknownDriver(u64),

    #[error("No proxy number available for this customer/driver pair")]
    PoolExhausted,

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            RelayError::UnknownCustomer(_) => (StatusCode::NOT_FOUND, "UNKNOWN_CUSTOMER"),
            RelayError::UnknownDriver(_) => (StatusCode::NOT_FOUND, "UNKNOWN_DRIVER"),
            RelayError::PoolExhausted => (StatusCode::CONFLICT, "POOL_EXHAUSTED"),
            RelayError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
            RelayError::RateLimitExceeded => (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMIT_EXCEEDED"),
        };

        let body = ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
