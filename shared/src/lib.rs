//! Shared configuration and common types for TaskMaster server
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types and layered loading
//! - Error response structures
//! - Response envelopes and health types

pub mod config;
pub mod errors;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CacheConfig, ConfigError, Environment, JwtConfig, LogFormat,
    LoggingConfig, RateLimitBackend, RateLimitConfig, ServerConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use types::{ApiResponse, HealthResponse, HealthStatus, ServiceHealth};
