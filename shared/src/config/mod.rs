//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - Session token and password hashing configuration
//! - `cache` - Redis configuration for revocation lists and counters
//! - `environment` - Environment detection and logging configuration
//! - `rate_limit` - Per-client request throttling
//! - `server` - HTTP server configuration
//!
//! [`AppConfig::load`] layers the per-environment defaults, an optional
//! `config.<environment>.toml` file and `TASKMASTER__`-prefixed environment
//! variables, in that order.

pub mod auth;
pub mod cache;
pub mod environment;
pub mod rate_limit;
pub mod server;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export commonly used types
pub use auth::{AuthConfig, JwtConfig};
pub use cache::CacheConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use rate_limit::{RateLimitBackend, RateLimitConfig};
pub use server::ServerConfig;

/// Prefix for environment variable overrides, e.g. `TASKMASTER__AUTH__JWT__SECRET`
pub const ENV_PREFIX: &str = "TASKMASTER";

/// Minimum HMAC secret length accepted in production
pub const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// Configuration loading and validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,

    /// Cache configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig::default(),
            auth: AuthConfig::default(),
            cache: CacheConfig::default(),
            rate_limit: RateLimitConfig::development(),
            logging: LoggingConfig::for_environment(Environment::Development),
        }
    }

    /// Create configuration for production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig::new("0.0.0.0", 8080),
            auth: AuthConfig::new(JwtConfig::new("")),
            cache: CacheConfig::new("redis://redis:6379"),
            rate_limit: RateLimitConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Production),
        }
    }

    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Production => Self::production(),
            Environment::Staging => Self {
                environment: Environment::Staging,
                rate_limit: RateLimitConfig::default(),
                logging: LoggingConfig::for_environment(Environment::Staging),
                ..Self::development()
            },
            Environment::Development => Self::development(),
        }
    }

    /// Load configuration for the environment named by `ENVIRONMENT`
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_for(Environment::from_env())
    }

    /// Load configuration for an explicit environment
    pub fn load_for(env: Environment) -> Result<Self, ConfigError> {
        let defaults = Self::for_environment(env);

        let loaded: AppConfig = config::Config::builder()
            .add_source(config::Config::try_from(&defaults)?)
            .add_source(config::File::new(env.config_file(), config::FileFormat::Toml).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("rate_limit.skip_paths"),
            )
            .build()?
            .try_deserialize()?;

        loaded.validate()?;
        Ok(loaded)
    }

    /// Reject settings the security pipeline cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let jwt = &self.auth.jwt;

        if jwt.secret.is_empty() {
            return Err(ConfigError::Invalid("auth.jwt.secret must be set".into()));
        }
        if self.environment.is_production() {
            if jwt.is_using_default_secret() {
                return Err(ConfigError::Invalid(
                    "auth.jwt.secret still uses the development default".into(),
                ));
            }
            if jwt.secret.len() < MIN_PRODUCTION_SECRET_LEN {
                return Err(ConfigError::Invalid(format!(
                    "auth.jwt.secret must be at least {} bytes in production",
                    MIN_PRODUCTION_SECRET_LEN
                )));
            }
        }
        if jwt.access_token_expiry <= 0 || jwt.refresh_token_expiry <= 0 {
            return Err(ConfigError::Invalid("token expiry must be positive".into()));
        }
        if jwt.access_token_expiry >= jwt.refresh_token_expiry {
            return Err(ConfigError::Invalid(
                "access token expiry must be shorter than refresh token expiry".into(),
            ));
        }
        if self.rate_limit.max_requests == 0 || self.rate_limit.window_seconds == 0 {
            return Err(ConfigError::Invalid(
                "rate_limit.max_requests and rate_limit.window_seconds must be positive".into(),
            ));
        }
        if self.cache.operation_timeout_ms == 0 {
            return Err(ConfigError::Invalid("cache.operation_timeout_ms must be positive".into()));
        }

        Ok(())
    }
}
