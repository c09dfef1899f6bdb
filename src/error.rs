//! Error types for the remote cache
//!
//! Provides unified error handling using thiserror.

use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache adapter and its HTTP gateway.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The remote store holds no value for the key
    #[error("Key does not exist: {0}")]
    KeyNotFound(String),

    /// Invalid request data (empty key, oversized key, malformed body)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The configured address cannot be turned into a host and port
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// The remote store refused the credential
    #[error("Authentication rejected: {0}")]
    AuthRejected(String),

    /// Connecting to the store did not complete in time
    #[error("Connection attempt timed out after {0:?}")]
    ConnectTimeout(Duration),

    /// The store answered the connection PING with something other than PONG
    #[error("Unexpected ping reply: {0}")]
    UnexpectedPing(String),

    /// Network, protocol or server error reported by the client library
    #[error("Transport error: {0}")]
    Transport(#[from] redis::RedisError),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::KeyNotFound(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::ConnectTimeout(_) => StatusCode::SERVICE_UNAVAILABLE,
            CacheError::Transport(_) | CacheError::UnexpectedPing(_) => StatusCode::BAD_GATEWAY,
            CacheError::InvalidAddress(_) | CacheError::AuthRejected(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache adapter.
pub type Result<T> = std::result::Result<T, CacheError>;
