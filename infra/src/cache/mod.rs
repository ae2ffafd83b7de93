//! Cache module for Redis-backed security state
//!
//! - `redis_client` - connection management and the raw commands
//! - `key_value` - revocation records behind `KeyValueBackend`
//! - `counter` - fixed-window rate counters behind `CounterBackend`

pub mod counter;
pub mod key_value;
pub mod redis_client;


use std::sync::Arc;

use tracing::{info, warn};

pub use counter::RedisCounterStore;
pub use key_value::RedisKeyValueStore;
pub use redis_client::RedisClient;

// Re-export commonly used types
pub use tm_shared::config::cache::CacheConfig;

/// Connects to the shared cache if it is enabled and reachable
///
/// Returns `None` when the cache is switched off or the connection attempts
/// are exhausted. The caller then runs on the in-process tier only.
pub async fn connect_optional(config: &CacheConfig) -> Option<Arc<RedisClient>> {
    if !config.enabled {
        info!("Shared cache disabled; revocation runs on the in-process tier");
        return None;
    }

    match RedisClient::connect(config.clone()).await {
        Ok(client) => Some(Arc::new(client)),
        Err(e) => {
            warn!(
                error = %e,
                "Shared cache unreachable at startup; revocation falls back to the in-process tier and rate limiting fails open"
            );
            None
        }
    }
}
