//! Redis cache client implementation
//!
//! Wraps a reconnecting [`ConnectionManager`] and exposes the handful of
//! commands the revocation store and the rate limiter need. Connection setup
//! retries with exponential backoff; individual commands do not retry, since
//! callers bound them with a short timeout and degrade instead.

use std::time::Duration;

use redis::{aio::ConnectionManager, AsyncCommands, Client, RedisError, Script};
use tokio::time::{sleep, timeout};
use tracing::{debug, error, info, warn};

use crate::cache::CacheConfig;
use crate::InfrastructureError;

/// INCR that starts a new window on the first hit. The PTTL guard repairs a
/// counter that somehow lost its expiry so it can never pin a client forever.
const INCREMENT_WINDOW_SCRIPT: &str = r"
local count = redis.call('INCR', KEYS[1])
if count == 1 or redis.call('PTTL', KEYS[1]) < 0 then
    redis.call('PEXPIRE', KEYS[1], ARGV[1])
end
return count
";

/// Upper bound for the backoff between connection attempts
const MAX_RETRY_DELAY_MS: u64 = 5000;

/// Redis cache client with automatic reconnection
///
/// Cloning is cheap; clones share the underlying multiplexed connection.
#[derive(Clone)]
pub struct RedisClient {
    connection: ConnectionManager,
    config: CacheConfig,
    increment_script: Script,
}

impl RedisClient {
    /// Connect using the retry settings from `config`
    ///
    /// Each attempt is bounded by `connection_timeout_ms`. Errors that retrying
    /// cannot fix, such as a malformed URL, fail immediately.
    pub async fn connect(config: CacheConfig) -> Result<Self, InfrastructureError> {
        info!(url = %mask_url(&config.url), "Creating Redis client");

        let client = Client::open(config.url.as_str()).map_err(|e| {
            error!("Failed to parse Redis URL: {}", e);
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let connection = Self::connect_with_retry(&client, &config).await?;
        info!("Redis client created successfully");

        Ok(Self {
            connection,
            config,
            increment_script: Script::new(INCREMENT_WINDOW_SCRIPT),
        })
    }

    async fn connect_with_retry(
        client: &Client,
        config: &CacheConfig,
    ) -> Result<ConnectionManager, InfrastructureError> {
        let attempt_timeout = Duration::from_millis(config.connection_timeout_ms);
        let max_attempts = config.max_retries.max(1);
        let mut delay = config.retry_delay_ms;
        let mut attempts = 0;

        loop {
            attempts += 1;
            debug!("Attempting to connect to Redis (attempt {})", attempts);

            let err = match timeout(attempt_timeout, ConnectionManager::new(client.clone())).await {
                Ok(Ok(connection)) => {
                    info!("Successfully connected to Redis");
                    return Ok(connection);
                }
                Ok(Err(e)) if !is_retriable_error(&e) => {
                    error!("Redis rejected the connection: {}", e);
                    return Err(InfrastructureError::Cache(e));
                }
                Ok(Err(e)) => InfrastructureError::Cache(e),
                Err(_) => InfrastructureError::ConnectTimeout(attempt_timeout),
            };

            if attempts >= max_attempts {
                error!("Failed to connect to Redis after {} attempts: {}", attempts, err);
                return Err(err);
            }

            warn!(
                "Failed to connect to Redis (attempt {}/{}): {}. Retrying in {}ms...",
                attempts, max_attempts, err, delay
            );
            sleep(Duration::from_millis(delay)).await;
            delay = (delay * 2).min(MAX_RETRY_DELAY_MS);
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Apply the configured key prefix
    pub fn key(&self, key: &str) -> String {
        self.config.make_key(key)
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>, InfrastructureError> {
        let mut conn = self.connection.clone();
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    /// SET with a millisecond expiry
    pub async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        expiry: Duration,
    ) -> Result<(), InfrastructureError> {
        let mut conn = self.connection.clone();
        redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("PX")
            .arg(expiry_millis(expiry))
            .query_async::<_, ()>(&mut conn)
            .await?;
        Ok(())
    }

    /// Returns whether a key was actually removed
    pub async fn delete(&self, key: &str) -> Result<bool, InfrastructureError> {
        let mut conn = self.connection.clone();
        let deleted: u32 = conn.del(key).await?;
        Ok(deleted > 0)
    }

    /// Increment a fixed-window counter, setting its expiry on the first hit
    ///
    /// INCR and PEXPIRE run as one script so a crash between them cannot leave
    /// a counter without expiry.
    pub async fn increment_window(&self, key: &str, window: Duration) -> Result<u64, InfrastructureError> {
        let mut conn = self.connection.clone();
        let count: i64 = self
            .increment_script
            .key(key)
            .arg(expiry_millis(window))
            .invoke_async(&mut conn)
            .await?;
        Ok(count.max(0) as u64)
    }

    /// Remaining lifetime of a key in milliseconds, `None` if missing or persistent
    pub async fn ttl_millis(&self, key: &str) -> Result<Option<u64>, InfrastructureError> {
        let mut conn = self.connection.clone();
        let ttl: i64 = redis::cmd("PTTL").arg(key).query_async(&mut conn).await?;
        Ok(u64::try_from(ttl).ok())
    }

    /// PING round trip
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        let mut conn = self.connection.clone();
        let response: String = redis::cmd("PING").query_async(&mut conn).await?;
        if response != "PONG" {
            warn!("Redis health check returned unexpected response: {}", response);
        }
        Ok(response == "PONG")
    }
}

/// Redis rejects `PX 0`, so sub-millisecond expiries round up
pub(crate) fn expiry_millis(expiry: Duration) -> u64 {
    u64::try_from(expiry.as_millis()).unwrap_or(u64::MAX).max(1)
}

/// Whether a connection error is transient
pub(crate) fn is_retriable_error(error: &RedisError) -> bool {
    matches!(
        error.kind(),
        redis::ErrorKind::IoError
            | redis::ErrorKind::ClientError
            | redis::ErrorKind::BusyLoadingError
            | redis::ErrorKind::TryAgain
    ) || error.is_timeout()
        || error.is_connection_refusal()
        || error.is_connection_dropped()
}

/// Mask credentials in a Redis URL for logging
pub(crate) fn mask_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(proto_end), Some(at_pos)) if at_pos > proto_end => {
            format!("{}****{}", &url[..proto_end + 3], &url[at_pos..])
        }
        _ => url.to_string(),
    }
}
