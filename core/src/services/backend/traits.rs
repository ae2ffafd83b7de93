//! Storage backend interfaces for the request-time security pipeline

use std::time::Duration;

use async_trait::async_trait;

use crate::errors::BackendError;

/// TTL-capable key/value storage
///
/// Implemented by the shared cache and by the in-process tier. Every method
/// reports failures instead of panicking so callers can degrade.
#[async_trait]
pub trait KeyValueBackend: Send + Sync {
    /// Short name used in logs and status reports
    fn name(&self) -> &'static str;

    /// Reads a live value; `Ok(None)` when absent or expired
    async fn try_read(&self, key: &str) -> Result<Option<String>, BackendError>;

    /// Writes a value that disappears after `ttl`
    async fn try_write(&self, key: &str, value: &str, ttl: Duration) -> Result<(), BackendError>;

    async fn try_remove(&self, key: &str) -> Result<(), BackendError>;

    /// Connectivity probe
    async fn ping(&self) -> Result<(), BackendError> {
        Ok(())
    }
}

/// Fixed-window counter storage
#[async_trait]
pub trait CounterBackend: Send + Sync {
    fn name(&self) -> &'static str;

    /// Atomically increments `key` and returns the count within the current
    /// window. The first increment of a window starts it with length `window`.
    async fn try_increment(&self, key: &str, window: Duration) -> Result<u64, BackendError>;
}
