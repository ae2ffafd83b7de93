//! Rate limiting configuration module

use serde::{Deserialize, Serialize};

/// Where the per-client counters live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RateLimitBackend {
    /// Shared Redis counters, consistent across instances
    Redis,
    /// In-process counters, for single-instance deployments
    Memory,
}

/// Fixed-window request throttling per client address
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Enable rate limiting
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Requests allowed per client within one window
    #[serde(default = "default_max_requests")]
    pub max_requests: u64,

    /// Window length in seconds
    #[serde(default = "default_window_seconds")]
    pub window_seconds: u64,

    /// Counter storage
    #[serde(default = "default_backend")]
    pub backend: RateLimitBackend,

    /// Path prefixes that bypass the limiter entirely
    #[serde(default = "default_skip_paths")]
    pub skip_paths: Vec<String>,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            max_requests: default_max_requests(),
            window_seconds: default_window_seconds(),
            backend: default_backend(),
            skip_paths: default_skip_paths(),
        }
    }
}

impl RateLimitConfig {
    /// Relaxed settings used during development
    pub fn development() -> Self {
        Self {
            max_requests: 1000,
            backend: RateLimitBackend::Memory,
            ..Default::default()
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    pub fn with_limit(mut self, max_requests: u64, window_seconds: u64) -> Self {
        self.max_requests = max_requests;
        self.window_seconds = window_seconds;
        self
    }

    pub fn with_backend(mut self, backend: RateLimitBackend) -> Self {
        self.backend = backend;
        self
    }

    /// Whether a request path bypasses the limiter
    pub fn is_skipped(&self, path: &str) -> bool {
        self.skip_paths.iter().any(|prefix| path.starts_with(prefix.as_str()))
    }
}

fn default_enabled() -> bool {
    true
}

fn default_max_requests() -> u64 {
    100
}

fn default_window_seconds() -> u64 {
    60
}

fn default_backend() -> RateLimitBackend {
    RateLimitBackend::Redis
}

fn default_skip_paths() -> Vec<String> {
    [
        "/api/v1/auth/register",
        "/api/v1/auth/login",
        "/swagger-ui",
        "/v3/api-docs",
        "/health",
    ]
    .iter()
    .map(|p| p.to_string())
    .collect()
}
