//! Configuration Module
//!
//! Handles loading and managing configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Connection parameters for the remote store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Host with optional `:port`; the default port is appended when missing
    pub address: String,
    /// Password for the remote store, empty when none is set
    pub password: String,
    /// Logical database index
    pub db: i64,
    /// Expiration in milliseconds used when `set` is called without one
    pub default_expire_ms: u64,
    /// Upper bound for connecting and answering the initial PING
    pub connect_timeout_ms: u64,
}

impl CacheConfig {
    /// Creates a config for `address` with the remaining fields at their defaults.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Self::default()
        }
    }

    pub fn default_expire(&self) -> Duration {
        Duration::from_millis(self.default_expire_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            password: String::new(),
            db: 0,
            default_expire_ms: 300_000,
            connect_timeout_ms: 5_000,
        }
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Remote store connection settings
    pub cache: CacheConfig,
    /// HTTP server port
    pub server_port: u16,
    /// Interval in seconds between background health checks
    pub health_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_ADDRESS` - Remote store address (default: 127.0.0.1)
    /// - `CACHE_PASSWORD` - Remote store password (default: empty)
    /// - `CACHE_DB` - Logical database index (default: 0)
    /// - `DEFAULT_EXPIRE_MS` - Default expiration in milliseconds (default: 300000)
    /// - `CONNECT_TIMEOUT_MS` - Connection timeout in milliseconds (default: 5000)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `HEALTH_INTERVAL` - Health check frequency in seconds (default: 30)
    pub fn from_env() -> Self {
        let defaults = CacheConfig::default();
        Self {
            cache: CacheConfig {
                address: env::var("CACHE_ADDRESS").unwrap_or(defaults.address),
                password: env::var("CACHE_PASSWORD").unwrap_or(defaults.password),
                db: parse_var("CACHE_DB", defaults.db),
                default_expire_ms: parse_var("DEFAULT_EXPIRE_MS", defaults.default_expire_ms),
                connect_timeout_ms: parse_var("CONNECT_TIMEOUT_MS", defaults.connect_timeout_ms),
            },
            server_port: parse_var("SERVER_PORT", 3000),
            health_interval: parse_var("HEALTH_INTERVAL", 30),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            server_port: 3000,
            health_interval: 30,
        }
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
