//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Health check: Pings the remote store at configured intervals

mod health;

pub use health::spawn_health_task;
