//! Cache configuration module

use serde::{Deserialize, Serialize};

/// Redis configuration for the shared fast-storage tier
///
/// The cache holds revocation records and rate counters. When it is disabled
/// or unreachable the pipeline keeps working on the in-process tier.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Use Redis at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Redis connection URL
    pub url: String,

    /// Connection timeout in milliseconds
    #[serde(default = "default_connection_timeout_ms")]
    pub connection_timeout_ms: u64,

    /// Upper bound for a single cache operation on the request path, in milliseconds
    #[serde(default = "default_operation_timeout_ms")]
    pub operation_timeout_ms: u64,

    /// Connection attempts at startup
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base delay between connection attempts, in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Optional prefix prepended to every key
    #[serde(default)]
    pub key_prefix: Option<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            url: String::from("redis://localhost:6379"),
            connection_timeout_ms: default_connection_timeout_ms(),
            operation_timeout_ms: default_operation_timeout_ms(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            key_prefix: None,
        }
    }
}

impl CacheConfig {
    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Configuration with the shared cache switched off
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Set the key prefix for all cache keys
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    pub fn with_operation_timeout_ms(mut self, millis: u64) -> Self {
        self.operation_timeout_ms = millis;
        self
    }

    /// Generate a cache key with prefix
    pub fn make_key(&self, key: &str) -> String {
        match &self.key_prefix {
            Some(prefix) => format!("{}:{}", prefix, key),
            None => key.to_string(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_connection_timeout_ms() -> u64 {
    2000
}

fn default_operation_timeout_ms() -> u64 {
    250
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    100
}
