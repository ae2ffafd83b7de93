//! Shared services handed to every worker

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use tm_core::repositories::UserRepository;
use tm_core::services::auth::{AuthService, AuthServiceConfig, Authenticator, UserPrincipalLoader};
use tm_core::services::backend::{CounterBackend, KeyValueBackend, MemoryCounterStore, TieredStore};
use tm_core::services::rate_limit::{RateLimitPolicy, RateLimiter};
use tm_core::services::revocation::RevocationStore;
use tm_core::services::token::{TokenCodec, TokenServiceConfig};
use tm_infra::cache::{RedisClient, RedisCounterStore, RedisKeyValueStore};
use tm_shared::config::{AppConfig, RateLimitBackend, RateLimitConfig};

/// Application state that holds shared services
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub authenticator: Arc<Authenticator>,
    pub revocations: Arc<RevocationStore>,
    pub rate_limiter: Arc<RateLimiter>,
    pub rate_limit: Arc<RateLimitConfig>,
}

impl AppState {
    /// Wire the pipeline from configuration
    ///
    /// `cache` is the shared Redis connection, or `None` when it is disabled
    /// or was unreachable at startup.
    pub fn build(config: &AppConfig, users: Arc<dyn UserRepository>, cache: Option<Arc<RedisClient>>) -> Self {
        let operation_timeout = Duration::from_millis(config.cache.operation_timeout_ms);
        let codec = Arc::new(TokenCodec::new(TokenServiceConfig::from(&config.auth.jwt)));

        let primary = cache
            .clone()
            .map(|client| Arc::new(RedisKeyValueStore::new(client)) as Arc<dyn KeyValueBackend>);
        let revocations = Arc::new(RevocationStore::new(
            codec.clone(),
            TieredStore::new(primary, operation_timeout),
        ));

        let counters: Option<Arc<dyn CounterBackend>> = match config.rate_limit.backend {
            RateLimitBackend::Memory => Some(Arc::new(MemoryCounterStore::new())),
            RateLimitBackend::Redis => cache.map(|client| Arc::new(RedisCounterStore::new(client)) as _),
        };
        let rate_limiter = Arc::new(RateLimiter::new(
            counters,
            RateLimitPolicy::from(&config.rate_limit),
            operation_timeout,
        ));
        info!(
            enabled = config.rate_limit.enabled,
            backend = rate_limiter.backend_name().unwrap_or("none"),
            max_requests = config.rate_limit.max_requests,
            window_seconds = config.rate_limit.window_seconds,
            "Rate limiter configured"
        );

        let auth_service = Arc::new(AuthService::new(
            users.clone(),
            codec.clone(),
            revocations.clone(),
            AuthServiceConfig::from(&config.auth),
        ));
        let authenticator = Arc::new(Authenticator::new(
            codec,
            revocations.clone(),
            Arc::new(UserPrincipalLoader::new(users)),
        ));

        Self {
            auth_service,
            authenticator,
            revocations,
            rate_limiter,
            rate_limit: Arc::new(config.rate_limit.clone()),
        }
    }
}
