//! Unit tests for the rate limiter

use std::sync::Arc;
use std::time::Duration;

use tm_shared::config::RateLimitConfig;

use crate::services::backend::tests::mocks::{FailingBackend, StalledBackend, SwitchableBackend};
use crate::services::backend::{CounterBackend, MemoryCounterStore};
use crate::services::rate_limit::{RateLimitPolicy, RateLimitStatus, RateLimiter};

const TIMEOUT: Duration = Duration::from_millis(250);

fn limiter(backend: Option<Arc<dyn CounterBackend>>, limit: u64) -> RateLimiter {
    RateLimiter::new(backend, RateLimitPolicy::new(limit, Duration::from_secs(60)), TIMEOUT)
}

#[test]
fn test_client_key() {
    assert_eq!(RateLimiter::client_key("192.168.1.7"), "rate:192.168.1.7");
}

#[test]
fn test_policy_from_config() {
    let policy = RateLimitPolicy::from(&RateLimitConfig::default());
    assert_eq!(policy, RateLimitPolicy::default());
    assert_eq!(policy.max_requests, 100);
    assert_eq!(policy.window, Duration::from_secs(60));
}

#[tokio::test(start_paused = true)]
async fn test_exactly_limit_requests_allowed_then_denied() {
    let limiter = limiter(Some(Arc::new(MemoryCounterStore::new())), 100);
    let key = RateLimiter::client_key("10.0.0.1");

    for _ in 0..100 {
        assert!(limiter.allow(&key).await);
    }
    assert_eq!(
        limiter.check(&key).await,
        RateLimitStatus::Exceeded { count: 101, limit: 100 }
    );
    assert!(!limiter.allow(&key).await);
}

#[tokio::test(start_paused = true)]
async fn test_new_window_allows_again() {
    let limiter = limiter(Some(Arc::new(MemoryCounterStore::new())), 3);
    let key = RateLimiter::client_key("10.0.0.1");

    for _ in 0..3 {
        assert!(limiter.allow(&key).await);
    }
    assert!(!limiter.allow(&key).await);

    tokio::time::advance(Duration::from_secs(60)).await;
    assert_eq!(limiter.check(&key).await, RateLimitStatus::Ok { count: 1, limit: 3 });
}

#[tokio::test]
async fn test_clients_are_limited_independently() {
    let limiter = limiter(Some(Arc::new(MemoryCounterStore::new())), 1);

    assert!(limiter.allow("rate:a").await);
    assert!(!limiter.allow("rate:a").await);
    assert!(limiter.allow("rate:b").await);
}

#[tokio::test]
async fn test_fails_open_when_backend_errors() {
    let backend = Arc::new(FailingBackend::default());
    let limiter = limiter(Some(backend.clone() as Arc<dyn CounterBackend>), 1);

    for _ in 0..10 {
        assert_eq!(limiter.check("rate:a").await, RateLimitStatus::Unmetered);
    }
    assert_eq!(backend.calls.load(std::sync::atomic::Ordering::SeqCst), 10);
}

#[tokio::test]
async fn test_fails_open_without_backend() {
    let limiter = limiter(None, 1);
    assert!(limiter.allow("rate:a").await);
    assert!(limiter.allow("rate:a").await);
    assert_eq!(limiter.backend_name(), None);
}

#[tokio::test(start_paused = true)]
async fn test_fails_open_when_backend_stalls() {
    let limiter = limiter(Some(Arc::new(StalledBackend)), 1);
    assert_eq!(limiter.check("rate:a").await, RateLimitStatus::Unmetered);
}

#[tokio::test]
async fn test_outage_requests_are_not_counted() {
    let backend = Arc::new(SwitchableBackend::default());
    let limiter = limiter(Some(backend.clone() as Arc<dyn CounterBackend>), 2);

    backend.set_down(true);
    for _ in 0..5 {
        assert!(limiter.allow("rate:a").await);
    }

    backend.set_down(false);
    assert_eq!(limiter.check("rate:a").await, RateLimitStatus::Ok { count: 1, limit: 2 });
}
