//! # Infrastructure Layer
//!
//! Concrete storage for the TaskMaster security pipeline. The core crate
//! defines the `KeyValueBackend` and `CounterBackend` seams; this crate fills
//! them with Redis so that revocations and rate counters are shared across
//! instances.
//!
//! ## Features
//!
//! - `redis-cache`: Enable Redis support (default)

use std::time::Duration;

use tm_core::errors::BackendError;

/// Cache module - Redis client and the backends built on it
pub mod cache;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Connection attempt did not finish in time
    #[error("Cache connection timed out after {0:?}")]
    ConnectTimeout(Duration),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for BackendError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::ConnectTimeout(elapsed) => BackendError::Timeout(elapsed),
            other => BackendError::unavailable(other.to_string()),
        }
    }
}
