//! Response DTOs for the cache gateway API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

/// Response body for the GET operation (GET /get/:key)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The stored value, decoded as UTF-8 with invalid sequences replaced
    pub value: String,
}

impl GetResponse {
    /// Creates a new GetResponse from the raw stored bytes
    pub fn new(key: impl Into<String>, value: &[u8]) -> Self {
        Self {
            key: key.into(),
            value: String::from_utf8_lossy(value).into_owned(),
        }
    }
}

/// Response body for the SET and SETEX operations
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    /// Success message
    pub message: String,
    /// The key that was set
    pub key: String,
}

impl SetResponse {
    /// Creates a new SetResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' set successfully", key),
            key,
        }
    }
}

/// Response body for the DELETE operation (DELETE /del/:pattern)
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The pattern whose matching keys were deleted
    pub pattern: String,
}

impl DeleteResponse {
    /// Creates a new DeleteResponse
    pub fn new(pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        Self {
            message: format!("Keys matching '{}' deleted successfully", pattern),
            pattern,
        }
    }
}

/// Response body for the existence check (GET /has/:key)
#[derive(Debug, Clone, Serialize)]
pub struct HasResponse {
    pub key: String,
    pub exists: bool,
}

impl HasResponse {
    pub fn new(key: impl Into<String>, exists: bool) -> Self {
        Self {
            key: key.into(),
            exists,
        }
    }
}

/// Response body for the key listing (GET /keys)
#[derive(Debug, Clone, Serialize)]
pub struct KeysResponse {
    /// Number of keys listed
    pub count: usize,
    /// Every key in the store, in scan order
    pub keys: Vec<String>,
}

impl KeysResponse {
    pub fn new(keys: Vec<String>) -> Self {
        Self {
            count: keys.len(),
            keys,
        }
    }
}

/// Response body for the flush operation (POST /reset)
#[derive(Debug, Clone, Serialize)]
pub struct ResetResponse {
    pub message: String,
}

impl ResetResponse {
    pub fn new() -> Self {
        Self {
            message: "All keys flushed".to_string(),
        }
    }
}

impl Default for ResetResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status ("healthy" or "unhealthy")
    pub status: String,
    /// Raw ping acknowledgement from the remote store
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ping: Option<String>,
    /// Why the remote store could not be reached
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a healthy response carrying the ping reply
    pub fn healthy(ping: impl Into<String>) -> Self {
        Self {
            status: "healthy".to_string(),
            ping: Some(ping.into()),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Creates an unhealthy response carrying the failure
    pub fn unhealthy(error: impl Into<String>) -> Self {
        Self {
            status: "unhealthy".to_string(),
            ping: None,
            error: Some(error.into()),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
