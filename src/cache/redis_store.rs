//! Redis Store Module
//!
//! `KeyValueStore` implementation over a multiplexed Redis connection.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::{AsyncCommands, ErrorKind, IntoConnectionInfo, RedisError};
use tracing::debug;

use crate::cache::address::parse_address;
use crate::cache::KeyValueStore;
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};

// == Redis Store ==
/// Redis-backed store sharing one multiplexed connection.
///
/// `ConnectionManager` is cheap to clone and reconnects on its own, so every
/// command works on a clone of the same handle. The first connection is
/// attempted once so that refused connections and rejected credentials
/// reach the caller instead of being retried until the connect timeout fires.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    // == Constructor ==
    /// Opens a connection to the store described by `config`.
    ///
    /// Selects the logical database and authenticates with the password when
    /// one is set. Does not ping; see [`crate::cache::RemoteCache::connect`].
    pub async fn open(config: &CacheConfig) -> Result<Self> {
        let (host, port) = parse_address(&config.address)?;

        let mut info = (host.clone(), port).into_connection_info()?;
        info.redis.db = config.db;
        if !config.password.is_empty() {
            info.redis.password = Some(config.password.clone());
        }

        let client = redis::Client::open(info).map_err(|err| match err.kind() {
            ErrorKind::InvalidClientConfig => CacheError::InvalidAddress(err.to_string()),
            _ => classify_connect_error(err),
        })?;

        let manager_config = ConnectionManagerConfig::new().set_number_of_retries(0);
        let conn = ConnectionManager::new_with_config(client, manager_config)
            .await
            .map_err(classify_connect_error)?;

        debug!("Opened connection to {}:{} db {}", host, port, config.db);
        Ok(Self { conn })
    }

    /// Wraps an already established connection.
    pub fn from_manager(conn: ConnectionManager) -> Self {
        Self { conn }
    }
}

// == Error Classification ==
/// Separates credential rejections from other transport failures.
pub(crate) fn classify_connect_error(err: RedisError) -> CacheError {
    let auth_code = matches!(err.code(), Some("WRONGPASS") | Some("NOAUTH"));
    if err.kind() == ErrorKind::AuthenticationFailed || auth_code {
        CacheError::AuthRejected(err.to_string())
    } else {
        CacheError::Transport(err)
    }
}

/// Converts an expiration to PX milliseconds, rounding up so sub-millisecond
/// expirations never become the invalid `PX 0`.
fn px_millis(expire: Duration) -> u64 {
    u64::try_from(expire.as_nanos().div_ceil(1_000_000)).unwrap_or(u64::MAX)
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn set(&self, key: &str, value: &[u8], expire: Option<Duration>) -> Result<()> {
        let mut con = self.conn.clone();
        let _: () = match expire {
            Some(expire) => con.pset_ex(key, value, px_millis(expire)).await?,
            None => con.set(key, value).await?,
        };
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut con = self.conn.clone();
        let value: Option<Vec<u8>> = con.get(key).await?;
        Ok(value)
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>> {
        let mut con = self.conn.clone();
        let keys: Vec<String> = con.keys(pattern).await?;
        Ok(keys)
    }

    async fn del(&self, key: &str) -> Result<u64> {
        let mut con = self.conn.clone();
        let removed: u64 = con.del(key).await?;
        Ok(removed)
    }

    async fn exists(&self, key: &str) -> Result<u64> {
        let mut con = self.conn.clone();
        let count: u64 = con.exists(key).await?;
        Ok(count)
    }

    async fn flush_all(&self) -> Result<()> {
        let mut con = self.conn.clone();
        let _: () = redis::cmd("FLUSHALL").query_async(&mut con).await?;
        Ok(())
    }

    async fn ping(&self) -> Result<String> {
        let mut con = self.conn.clone();
        let reply: String = redis::cmd("PING").query_async(&mut con).await?;
        Ok(reply)
    }

    // `scan_match` hides the cursor and page size, so the page is requested directly
    async fn scan(&self, cursor: u64, pattern: &str, count: usize) -> Result<(u64, Vec<String>)> {
        let mut con = self.conn.clone();
        let (next, keys): (u64, Vec<String>) = redis::cmd("SCAN")
            .arg(cursor)
            .arg("MATCH")
            .arg(pattern)
            .arg("COUNT")
            .arg(count)
            .query_async(&mut con)
            .await?;
        Ok((next, keys))
    }
}
