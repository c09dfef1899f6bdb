//! Store Module
//!
//! The native commands the cache adapter forwards to the remote store.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

// == Key Value Store ==
/// Native commands of the remote key-value store.
///
/// Each method maps to exactly one round-trip. Implementations must be safe
/// for concurrent use; the adapter adds no locking of its own.
#[async_trait]
pub trait KeyValueStore: Send + Sync + 'static {
    /// `SET key value [PX ms]`; `None` stores the value without expiration.
    async fn set(&self, key: &str, value: &[u8], expire: Option<Duration>) -> Result<()>;

    /// `GET key`; `None` is the store's "no value" reply.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// `KEYS pattern`
    async fn keys(&self, pattern: &str) -> Result<Vec<String>>;

    /// `DEL key`, returning the number of keys removed.
    async fn del(&self, key: &str) -> Result<u64>;

    /// `EXISTS key`, returning the existence count.
    async fn exists(&self, key: &str) -> Result<u64>;

    /// `FLUSHALL`
    async fn flush_all(&self) -> Result<()>;

    /// `PING`
    async fn ping(&self) -> Result<String>;

    /// `SCAN cursor MATCH pattern COUNT count`, returning the next cursor and a page of keys.
    async fn scan(&self, cursor: u64, pattern: &str, count: usize) -> Result<(u64, Vec<String>)>;
}
