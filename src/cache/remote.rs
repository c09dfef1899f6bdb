//! Remote Cache Module
//!
//! The cache adapter: translates the cache API into remote store commands.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::cache::redis_store::classify_connect_error;
use crate::cache::{KeyValueStore, RedisStore, PONG, SCAN_PAGE_SIZE};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};

// == Remote Cache ==
/// Handle to the remote store plus the default expiration for `set`.
///
/// Clones share the same store handle; the connection is released when the
/// last clone is dropped.
#[derive(Clone)]
pub struct RemoteCache {
    store: Arc<dyn KeyValueStore>,
    default_expire: Duration,
}

impl fmt::Debug for RemoteCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteCache")
            .field("default_expire", &self.default_expire)
            .finish_non_exhaustive()
    }
}

impl RemoteCache {
    // == Constructors ==
    /// Wraps an existing store handle. No PING is sent.
    pub fn new(store: impl KeyValueStore, default_expire: Duration) -> Self {
        Self {
            store: Arc::new(store),
            default_expire,
        }
    }

    /// Connects to the Redis store described by `config` and pings it.
    ///
    /// Opening the connection and the first PING together are bounded by
    /// `config.connect_timeout_ms`.
    ///
    /// # Errors
    /// - `InvalidAddress` when the address has no usable host or port
    /// - `AuthRejected` when the store refuses the credential
    /// - `ConnectTimeout` when the store does not answer in time
    /// - `UnexpectedPing` when the PING reply is not `PONG`
    /// - `Transport` for any other client failure
    pub async fn connect(config: &CacheConfig) -> Result<Self> {
        let timeout = config.connect_timeout();

        let handshake = async {
            let store = RedisStore::open(config).await?;
            let reply = store.ping().await.map_err(|err| match err {
                CacheError::Transport(err) => classify_connect_error(err),
                other => other,
            })?;
            Ok::<_, CacheError>((store, reply))
        };

        let (store, reply) = tokio::time::timeout(timeout, handshake)
            .await
            .map_err(|_| CacheError::ConnectTimeout(timeout))??;

        if reply != PONG {
            return Err(CacheError::UnexpectedPing(reply));
        }

        info!(
            "Connected to remote cache at {} (db {})",
            config.address, config.db
        );
        Ok(Self::new(store, config.default_expire()))
    }

    /// Expiration applied by `set` when none is given.
    pub fn default_expire(&self) -> Duration {
        self.default_expire
    }

    // == Set ==
    /// Stores `value` under `key`, overwriting any existing value and expiration.
    ///
    /// `None` or a zero expiration falls back to the default expiration. A
    /// zero default stores the value without expiration.
    pub async fn set(&self, key: &str, value: &[u8], expire: Option<Duration>) -> Result<()> {
        let expire = match expire {
            Some(expire) if !expire.is_zero() => expire,
            _ => self.default_expire,
        };
        self.set_ex(key, value, expire).await
    }

    // == SetEx ==
    /// Stores `value` under `key` with exactly `expire`; zero means no expiration.
    pub async fn set_ex(&self, key: &str, value: &[u8], expire: Duration) -> Result<()> {
        validate_key(key)?;
        debug!("SET {} ({} bytes, expire {:?})", key, value.len(), expire);
        let expire = (!expire.is_zero()).then_some(expire);
        self.store.set(key, value, expire).await
    }

    // == Get ==
    /// Returns the stored value, or an empty vec when the key is missing or the
    /// lookup fails.
    ///
    /// Absent keys, empty values and transport failures all look alike here;
    /// use [`RemoteCache::get_with_err`] to tell them apart.
    pub async fn get(&self, key: &str) -> Vec<u8> {
        match self.get_with_err(key).await {
            Ok(value) => value,
            Err(CacheError::KeyNotFound(_)) => Vec::new(),
            Err(err) => {
                warn!("GET {} failed: {}", key, err);
                Vec::new()
            }
        }
    }

    // == Get With Err ==
    /// Returns the stored value, or `KeyNotFound` when the store has none.
    pub async fn get_with_err(&self, key: &str) -> Result<Vec<u8>> {
        validate_key(key)?;
        debug!("GET {}", key);
        self.store
            .get(key)
            .await?
            .ok_or_else(|| CacheError::KeyNotFound(key.to_string()))
    }

    // == Del ==
    /// Deletes every key matching the glob `pattern`, one key at a time.
    ///
    /// Not atomic: stops at the first failed deletion and returns it, keeping
    /// the deletions made before it. Keys created after the pattern is
    /// resolved are not touched.
    pub async fn del(&self, pattern: &str) -> Result<()> {
        if pattern.is_empty() {
            return Err(CacheError::InvalidRequest(
                "Key pattern cannot be empty".to_string(),
            ));
        }

        let keys = self.store.keys(pattern).await?;
        debug!("DEL {} matched {} keys", pattern, keys.len());

        for key in &keys {
            self.store.del(key).await?;
        }
        Ok(())
    }

    // == Has ==
    /// Returns true when the store reports the key as existing.
    ///
    /// Lookup failures are logged and reported as absent.
    pub async fn has(&self, key: &str) -> bool {
        match self.store.exists(key).await {
            Ok(count) => count > 0,
            Err(err) => {
                warn!("EXISTS {} failed: {}", key, err);
                false
            }
        }
    }

    // == Reset ==
    /// Flushes every database of the remote store.
    pub async fn reset(&self) -> Result<()> {
        warn!("Flushing all keys of the remote store");
        self.store.flush_all().await
    }

    // == Ping ==
    /// Returns the raw liveness acknowledgement.
    pub async fn ping(&self) -> Result<String> {
        self.store.ping().await
    }

    // == List Keys ==
    /// Lists every key with a cursor scan of `SCAN_PAGE_SIZE` keys per page.
    ///
    /// A failed page aborts the listing with that error. Keys may repeat if
    /// they are written during the scan.
    pub async fn list_keys(&self) -> Result<Vec<String>> {
        let mut all_keys = Vec::new();
        let mut cursor = 0;

        loop {
            let (next, keys) = self.store.scan(cursor, "*", SCAN_PAGE_SIZE).await?;
            all_keys.extend(keys);
            if next == 0 {
                break;
            }
            cursor = next;
        }

        Ok(all_keys)
    }
}

fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(CacheError::InvalidRequest("Key cannot be empty".to_string()));
    }
    Ok(())
}
