//! Request DTOs for the cache gateway API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::cache::MAX_KEY_LENGTH;

/// Request body for the SET operation (PUT /set)
///
/// # Fields
/// - `key`: The cache key to store the value under
/// - `value`: The value to store
/// - `ttl_ms`: Optional expiration in milliseconds (absent or 0 uses the default)
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The cache key
    pub key: String,
    /// The value to store
    pub value: String,
    /// Optional expiration in milliseconds
    #[serde(default)]
    pub ttl_ms: Option<u64>,
}

impl SetRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        validate_key(&self.key)
    }
}

/// Request body for the SETEX operation (PUT /setex)
///
/// The expiration is mandatory and used as given; 0 stores without expiration.
#[derive(Debug, Clone, Deserialize)]
pub struct SetExRequest {
    pub key: String,
    pub value: String,
    pub ttl_ms: u64,
}

impl SetExRequest {
    pub fn validate(&self) -> Option<String> {
        validate_key(&self.key)
    }
}

/// Validates a key or key pattern taken from a request
///
/// Returns an error message if validation fails, None if valid.
pub fn validate_key(key: &str) -> Option<String> {
    if key.is_empty() {
        return Some("Key cannot be empty".to_string());
    }
    if key.len() > MAX_KEY_LENGTH {
        return Some(format!(
            "Key exceeds maximum length of {} characters",
            MAX_KEY_LENGTH
        ));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_request_deserialize() {
        let json = r#"{"key": "test", "value": "hello"}"#;
        let req: SetRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.key, "test");
        assert_eq!(req.value, "hello");
        assert!(req.ttl_ms.is_none());
    }

    #[test]
    fn test_set_request_with_ttl() {
        let json = r#"{"key": "test", "value": "hello", "ttl_ms": 60000}"#;
        let req: SetRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.ttl_ms, Some(60_000));
    }

    #[test]
    fn test_setex_request_requires_ttl() {
        let json = r#"{"key": "test", "value": "hello"}"#;
        assert!(serde_json::from_str::<SetExRequest>(json).is_err());

        let json = r#"{"key": "test", "value": "hello", "ttl_ms": 0}"#;
        let req: SetExRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.ttl_ms, 0);
    }

    #[test]
    fn test_validate_empty_key() {
        let req = SetRequest {
            key: "".to_string(),
            value: "test".to_string(),
            ttl_ms: None,
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_validate_key_too_long() {
        let req = SetExRequest {
            key: "x".repeat(MAX_KEY_LENGTH + 1),
            value: "test".to_string(),
            ttl_ms: 10,
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_validate_path_key() {
        assert!(validate_key("user:*").is_none());
        assert!(validate_key("").is_some());
        assert!(validate_key(&"k".repeat(MAX_KEY_LENGTH + 1)).is_some());
    }

    #[test]
    fn test_validate_valid_request() {
        let req = SetRequest {
            key: "valid_key".to_string(),
            value: "test".to_string(),
            ttl_ms: Some(60_000),
        };
        assert!(req.validate().is_none());
    }
}
