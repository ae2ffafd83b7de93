//! Shared fixtures for the API integration tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{body::MessageBody, dev::ServiceResponse, http::header, test, web};
use serde_json::{json, Value};

use tm_api::AppState;
use tm_core::repositories::InMemoryUserRepository;
use tm_shared::config::{AppConfig, CacheConfig, RateLimitBackend, RateLimitConfig};

pub const PASSWORD: &str = "Engine#1843";

/// Development configuration without Redis and with cheap password hashing
pub fn test_config(rate_limit: RateLimitConfig) -> AppConfig {
    let mut config = AppConfig::development();
    config.cache = CacheConfig::disabled();
    config.auth.password_hash_cost = 4;
    config.rate_limit = rate_limit;
    config
}

/// In-process counters with the given quota per minute
pub fn memory_limit(max_requests: u64) -> RateLimitConfig {
    RateLimitConfig::default()
        .with_limit(max_requests, 60)
        .with_backend(RateLimitBackend::Memory)
}

pub fn state(config: &AppConfig) -> web::Data<AppState> {
    web::Data::new(AppState::build(
        config,
        Arc::new(InMemoryUserRepository::new()),
        None,
    ))
}

pub fn register_body(email: &str, role: Option<&str>) -> Value {
    json!({
        "first_name": "Ada",
        "last_name": "Lovelace",
        "email": email,
        "password": PASSWORD,
        "confirm_password": PASSWORD,
        "role": role,
    })
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

pub async fn body_text<B: MessageBody>(response: ServiceResponse<B>) -> String {
    let bytes = test::read_body(response).await;
    String::from_utf8(bytes.to_vec()).unwrap()
}
