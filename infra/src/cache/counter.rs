//! Redis-backed fixed-window counters

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use tm_core::errors::BackendError;
use tm_core::services::backend::CounterBackend;

use crate::cache::redis_client::RedisClient;

/// Rate counters shared by every instance pointing at the same Redis
#[derive(Clone)]
pub struct RedisCounterStore {
    client: Arc<RedisClient>,
}

impl RedisCounterStore {
    pub fn new(client: Arc<RedisClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CounterBackend for RedisCounterStore {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn try_increment(&self, key: &str, window: Duration) -> Result<u64, BackendError> {
        Ok(self.client.increment_window(&self.client.key(key), window).await?)
    }
}
