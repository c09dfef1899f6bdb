//! API Routes
//!
//! Configures the Axum router with all cache gateway endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    delete_handler, get_handler, has_handler, health_handler, keys_handler, reset_handler,
    set_handler, setex_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `PUT /set` - Store a key-value pair, default expiration when none given
/// - `PUT /setex` - Store a key-value pair with an explicit expiration
/// - `GET /get/:key` - Retrieve a value by key
/// - `GET /has/:key` - Check whether a key exists
/// - `DELETE /del/:pattern` - Delete every key matching a glob pattern
/// - `GET /keys` - List all keys
/// - `POST /reset` - Flush the remote store
/// - `GET /health` - Ping the remote store
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/set", put(set_handler))
        .route("/setex", put(setex_handler))
        .route("/get/:key", get(get_handler))
        .route("/has/:key", get(has_handler))
        .route("/del/:pattern", delete(delete_handler))
        .route("/keys", get(keys_handler))
        .route("/reset", post(reset_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
