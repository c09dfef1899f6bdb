//! Cache Module
//!
//! Key-value cache adapter over a remote Redis store.

pub mod address;
mod redis_store;
mod remote;
mod store;

#[cfg(test)]
pub(crate) mod memory;


// Re-export public types
pub use redis_store::RedisStore;
pub use remote::RemoteCache;
pub use store::KeyValueStore;

// == Public Constants ==
/// Port appended to addresses that do not carry one
pub const DEFAULT_PORT: u16 = 6379;

/// Keys requested per SCAN page when listing keys
pub const SCAN_PAGE_SIZE: usize = 10;

/// Acknowledgement expected from a healthy store
pub const PONG: &str = "PONG";

/// Maximum key length accepted by the HTTP gateway, in bytes
pub const MAX_KEY_LENGTH: usize = 256;
