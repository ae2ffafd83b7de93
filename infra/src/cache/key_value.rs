//! Redis-backed revocation records

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use tm_core::errors::BackendError;
use tm_core::services::backend::KeyValueBackend;

use crate::cache::redis_client::RedisClient;

/// Shared TTL store used as the primary revocation tier
#[derive(Clone)]
pub struct RedisKeyValueStore {
    client: Arc<RedisClient>,
}

impl RedisKeyValueStore {
    pub fn new(client: Arc<RedisClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl KeyValueBackend for RedisKeyValueStore {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn try_read(&self, key: &str) -> Result<Option<String>, BackendError> {
        Ok(self.client.get(&self.client.key(key)).await?)
    }

    async fn try_write(&self, key: &str, value: &str, ttl: Duration) -> Result<(), BackendError> {
        let key = self.client.key(key);
        self.client.set_with_expiry(&key, value, ttl).await?;
        debug!(ttl_ms = ttl.as_millis() as u64, "Stored record in Redis");
        Ok(())
    }

    async fn try_remove(&self, key: &str) -> Result<(), BackendError> {
        self.client.delete(&self.client.key(key)).await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), BackendError> {
        if self.client.health_check().await? {
            Ok(())
        } else {
            Err(BackendError::unavailable("unexpected PING reply"))
        }
    }
}
