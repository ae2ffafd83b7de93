//! Fixed-window request limiter

use std::sync::Arc;
use std::time::Duration;

use tm_shared::config::RateLimitConfig;

use crate::errors::BackendError;
use crate::services::backend::{bounded, CounterBackend};

/// Key prefix of per-client counters
pub const RATE_KEY_PREFIX: &str = "rate:";

/// Requests allowed per window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    pub max_requests: u64,
    pub window: Duration,
}

impl RateLimitPolicy {
    pub fn new(max_requests: u64, window: Duration) -> Self {
        Self { max_requests, window }
    }
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self::new(100, Duration::from_secs(60))
    }
}

impl From<&RateLimitConfig> for RateLimitPolicy {
    fn from(config: &RateLimitConfig) -> Self {
        Self::new(config.max_requests, Duration::from_secs(config.window_seconds))
    }
}

/// Outcome of a limiter check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitStatus {
    /// Request is within limits
    Ok { count: u64, limit: u64 },
    /// Quota for the current window is used up
    Exceeded { count: u64, limit: u64 },
    /// Counter backend unavailable; request let through uncounted
    Unmetered,
}

impl RateLimitStatus {
    pub fn is_allowed(&self) -> bool {
        !matches!(self, RateLimitStatus::Exceeded { .. })
    }
}

/// Per-client fixed-window counter that fails open
///
/// Any backend failure, including a timeout or a missing backend, allows the
/// request. The limiter never counts against a second tier in that case.
pub struct RateLimiter {
    backend: Option<Arc<dyn CounterBackend>>,
    policy: RateLimitPolicy,
    operation_timeout: Duration,
}

impl RateLimiter {
    pub fn new(
        backend: Option<Arc<dyn CounterBackend>>,
        policy: RateLimitPolicy,
        operation_timeout: Duration,
    ) -> Self {
        Self {
            backend,
            policy,
            operation_timeout,
        }
    }

    /// Counter key for a client address
    pub fn client_key(client: &str) -> String {
        format!("{}{}", RATE_KEY_PREFIX, client)
    }

    pub fn policy(&self) -> RateLimitPolicy {
        self.policy
    }

    /// Name of the counter backend, if any
    pub fn backend_name(&self) -> Option<&'static str> {
        self.backend.as_ref().map(|b| b.name())
    }

    /// Counts one request for `key` and reports whether it may proceed
    pub async fn check(&self, key: &str) -> RateLimitStatus {
        let result = match &self.backend {
            Some(backend) => {
                bounded(self.operation_timeout, backend.try_increment(key, self.policy.window)).await
            }
            None => Err(BackendError::NotConfigured),
        };

        match result {
            Ok(count) if count <= self.policy.max_requests => RateLimitStatus::Ok {
                count,
                limit: self.policy.max_requests,
            },
            Ok(count) => RateLimitStatus::Exceeded {
                count,
                limit: self.policy.max_requests,
            },
            Err(e) => {
                tracing::warn!(error = %e, "Rate limiter backend failed, allowing request");
                RateLimitStatus::Unmetered
            }
        }
    }

    /// `true` if the request may proceed
    pub async fn allow(&self, key: &str) -> bool {
        self.check(key).await.is_allowed()
    }
}
