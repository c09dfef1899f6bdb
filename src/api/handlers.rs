//! API Handlers
//!
//! HTTP request handlers exposing the remote cache operations.

use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::warn;

use crate::cache::RemoteCache;
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::models::{
    validate_key, DeleteResponse, GetResponse, HasResponse, HealthResponse, KeysResponse,
    ResetResponse, SetExRequest, SetRequest, SetResponse,
};

/// Application state shared across all handlers.
///
/// `RemoteCache` is a cheap handle over a multiplexed connection, so no
/// extra locking is needed around it.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Handle to the remote store
    pub cache: RemoteCache,
}

impl AppState {
    /// Creates a new AppState around an existing cache handle.
    pub fn new(cache: RemoteCache) -> Self {
        Self { cache }
    }

    /// Connects to the remote store described by the configuration.
    pub async fn connect(config: &CacheConfig) -> Result<Self> {
        let cache = RemoteCache::connect(config).await?;
        Ok(Self::new(cache))
    }
}

/// Rejects empty or oversized keys taken from the request path.
fn check_path_key(key: &str) -> Result<()> {
    match validate_key(key) {
        Some(error_msg) => Err(CacheError::InvalidRequest(error_msg)),
        None => Ok(()),
    }
}

/// Handler for PUT /set
///
/// Stores a key-value pair; a missing or zero `ttl_ms` uses the default expiration.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let expire = req.ttl_ms.map(Duration::from_millis);
    state
        .cache
        .set(&req.key, req.value.as_bytes(), expire)
        .await?;

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for PUT /setex
///
/// Stores a key-value pair with exactly the given expiration.
pub async fn setex_handler(
    State(state): State<AppState>,
    Json(req): Json<SetExRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    state
        .cache
        .set_ex(
            &req.key,
            req.value.as_bytes(),
            Duration::from_millis(req.ttl_ms),
        )
        .await?;

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for GET /get/:key
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    check_path_key(&key)?;
    let value = state.cache.get_with_err(&key).await?;
    Ok(Json(GetResponse::new(key, &value)))
}

/// Handler for GET /has/:key
pub async fn has_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<HasResponse>> {
    check_path_key(&key)?;
    let exists = state.cache.has(&key).await;
    Ok(Json(HasResponse::new(key, exists)))
}

/// Handler for DELETE /del/:pattern
///
/// Deletes every key matching the glob pattern.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(pattern): Path<String>,
) -> Result<Json<DeleteResponse>> {
    check_path_key(&pattern)?;
    state.cache.del(&pattern).await?;
    Ok(Json(DeleteResponse::new(pattern)))
}

/// Handler for GET /keys
pub async fn keys_handler(State(state): State<AppState>) -> Result<Json<KeysResponse>> {
    let keys = state.cache.list_keys().await?;
    Ok(Json(KeysResponse::new(keys)))
}

/// Handler for POST /reset
///
/// Flushes every database of the remote store.
pub async fn reset_handler(State(state): State<AppState>) -> Result<Json<ResetResponse>> {
    state.cache.reset().await?;
    Ok(Json(ResetResponse::new()))
}

/// Handler for GET /health
///
/// Pings the remote store; answers 503 when it cannot be reached.
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match state.cache.ping().await {
        Ok(reply) => (StatusCode::OK, Json(HealthResponse::healthy(reply))),
        Err(err) => {
            warn!("Health check failed: {}", err);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse::unhealthy(err.to_string())),
            )
        }
    }
}
