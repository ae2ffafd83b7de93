//! Per-client request throttling
//!
//! Runs before authentication. Allow-listed path prefixes bypass the limiter
//! without touching a counter; everything else is counted against the
//! client's socket address. Counter failures let the request through.

use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
};

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::ContentType,
    Error, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use tracing::{debug, warn};

use tm_core::services::rate_limit::RateLimiter;
use tm_shared::config::RateLimitConfig;

/// Body of the 429 response
pub const RATE_LIMIT_MESSAGE: &str = "Too many requests. Try again later.";

/// Client address used when the peer address is unknown
const UNKNOWN_CLIENT: &str = "unknown";

/// Rate limit middleware factory
#[derive(Clone)]
pub struct RateLimitFilter {
    limiter: Arc<RateLimiter>,
    config: Arc<RateLimitConfig>,
}

impl RateLimitFilter {
    pub fn new(limiter: Arc<RateLimiter>, config: Arc<RateLimitConfig>) -> Self {
        Self { limiter, config }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimitFilter
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            limiter: self.limiter.clone(),
            config: self.config.clone(),
        }))
    }
}

/// Rate limit middleware service
pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    limiter: Arc<RateLimiter>,
    config: Arc<RateLimitConfig>,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut std::task::Context<'_>) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        if !self.config.enabled || self.config.is_skipped(req.path()) {
            return Box::pin(async move { service.call(req).await.map(ServiceResponse::map_into_left_body) });
        }

        let limiter = self.limiter.clone();
        let key = RateLimiter::client_key(&client_address(&req));

        Box::pin(async move {
            if limiter.allow(&key).await {
                return service.call(req).await.map(ServiceResponse::map_into_left_body);
            }

            warn!(client = %key, path = %req.path(), "Rate limit exceeded");
            let response = HttpResponse::TooManyRequests()
                .insert_header(ContentType::plaintext())
                .body(RATE_LIMIT_MESSAGE);
            Ok(req.into_response(response).map_into_right_body())
        })
    }
}

/// Socket peer IP of the request
pub fn client_address(req: &ServiceRequest) -> String {
    match req.peer_addr() {
        Some(addr) => addr.ip().to_string(),
        None => {
            debug!("Request without peer address, counting as {}", UNKNOWN_CLIENT);
            UNKNOWN_CLIENT.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_client_address_uses_peer_ip() {
        let req = TestRequest::default()
            .peer_addr("203.0.113.9:51234".parse().unwrap())
            .to_srv_request();
        assert_eq!(client_address(&req), "203.0.113.9");
    }

    #[test]
    fn test_client_address_without_peer() {
        let req = TestRequest::default().to_srv_request();
        assert_eq!(client_address(&req), "unknown");
    }
}
