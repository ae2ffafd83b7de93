//! Storage tiers behind revocation and rate limiting
//!
//! - `traits` - backend interfaces implemented by Redis and the in-process tier
//! - `memory` - lock-striped in-process maps with lazy expiry
//! - `tiered` - primary-then-fallback coordination

mod memory;
mod tiered;
mod traits;

#[cfg(test)]
pub(crate) mod tests;

use std::future::Future;
use std::time::Duration;

use crate::errors::BackendError;

pub use memory::{MemoryCounterStore, MemoryKeyValueStore, PURGE_INTERVAL};
pub use tiered::{PrimaryStatus, StoreTier, TieredStore};
pub use traits::{CounterBackend, KeyValueBackend};

/// Runs a backend call with an upper bound on its duration
pub async fn bounded<T, F>(timeout: Duration, call: F) -> Result<T, BackendError>
where
    F: Future<Output = Result<T, BackendError>>,
{
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result,
        Err(_) => Err(BackendError::Timeout(timeout)),
    }
}
