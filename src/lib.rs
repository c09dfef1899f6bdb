//! Remote Cache - a thin key-value cache adapter over a remote Redis store
//!
//! Provides set/get/delete/existence/list/flush operations with per-key
//! expiration, plus an HTTP gateway exposing them.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::RemoteCache;
pub use config::{CacheConfig, Config};
pub use error::CacheError;
pub use tasks::spawn_health_task;
