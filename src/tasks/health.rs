//! Health Check Task
//!
//! Background task that periodically pings the remote store and logs the outcome.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::{RemoteCache, PONG};

/// Spawns a background task that pings the remote store every interval.
///
/// The task only reports; reconnection is left to the connection manager.
///
/// # Arguments
/// * `cache` - Handle to the remote store
/// * `interval_secs` - Interval in seconds between health checks
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
pub fn spawn_health_task(cache: RemoteCache, interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting health check task with interval of {} seconds",
            interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            match cache.ping().await {
                Ok(reply) if reply == PONG => debug!("Health check: remote store answered"),
                Ok(reply) => warn!("Health check: unexpected reply {:?}", reply),
                Err(err) => warn!("Health check failed: {}", err),
            }
        }
    })
}
