//! API Module
//!
//! HTTP handlers and routing for the cache gateway REST API.
//!
//! # Endpoints
//! - `PUT /set` - Store a key-value pair
//! - `PUT /setex` - Store a key-value pair with explicit expiration
//! - `GET /get/:key` - Retrieve a value by key
//! - `GET /has/:key` - Check whether a key exists
//! - `DELETE /del/:pattern` - Delete keys matching a pattern
//! - `GET /keys` - List all keys
//! - `POST /reset` - Flush the remote store
//! - `GET /health` - Health check against the remote store

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
