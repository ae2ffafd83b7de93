//! Bearer token authentication for every request.
//!
//! The filter never rejects a request for lacking identity. It either attaches
//! an [`AuthContext`] to the request extensions, passes the request on
//! anonymously, or stops it with `401 Token is blacklisted` when the token
//! was revoked. Route handlers decide what identity they need through the
//! [`AuthContext`] and [`OptionalAuth`] extractors.

use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use actix_web::{
    body::EitherBody,
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{ContentType, AUTHORIZATION},
    Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
};
use chrono::{DateTime, Utc};
use futures_util::future::LocalBoxFuture;
use tracing::{debug, warn};
use uuid::Uuid;

use tm_core::services::auth::{AuthOutcome, AuthenticatedPrincipal, Authenticator};
use tm_core::UserRole;

use crate::handlers::error::ApiError;

/// Body of the 401 response for revoked tokens
pub const REVOKED_TOKEN_MESSAGE: &str = "Token is blacklisted";

const BEARER_PREFIX: &str = "Bearer ";

/// User authentication context injected into requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub email: String,
    pub roles: Vec<UserRole>,
    /// When the presented access token stops being accepted
    pub token_expires_at: DateTime<Utc>,
}

impl AuthContext {
    pub fn has_role(&self, role: UserRole) -> bool {
        self.roles.contains(&role)
    }

    /// Fails with 403 unless the identity holds at least one of `roles`
    pub fn require_any_role(&self, roles: &[UserRole]) -> Result<(), ApiError> {
        if roles.iter().any(|role| self.has_role(*role)) {
            Ok(())
        } else {
            debug!(user_id = %self.user_id, required = ?roles, "Role check failed");
            Err(ApiError::Forbidden)
        }
    }
}

impl From<AuthenticatedPrincipal> for AuthContext {
    fn from(authenticated: AuthenticatedPrincipal) -> Self {
        Self {
            user_id: authenticated.principal.user_id,
            email: authenticated.principal.email,
            roles: authenticated.principal.roles,
            token_expires_at: authenticated.token_expires_at,
        }
    }
}

/// Authentication middleware factory
#[derive(Clone)]
pub struct AuthenticationFilter {
    authenticator: Arc<Authenticator>,
}

impl AuthenticationFilter {
    pub fn new(authenticator: Arc<Authenticator>) -> Self {
        Self { authenticator }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthenticationFilter
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthenticationMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthenticationMiddleware {
            service: Rc::new(service),
            authenticator: self.authenticator.clone(),
        }))
    }
}

/// Authentication middleware service
pub struct AuthenticationMiddleware<S> {
    service: Rc<S>,
    authenticator: Arc<Authenticator>,
}

impl<S, B> Service<ServiceRequest> for AuthenticationMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let authenticator = self.authenticator.clone();

        Box::pin(async move {
            let token = match extract_bearer_token(req.headers()) {
                Some(token) if !req.extensions().contains::<AuthContext>() => token,
                _ => return service.call(req).await.map(ServiceResponse::map_into_left_body),
            };

            match authenticator.authenticate(&token).await {
                AuthOutcome::Revoked => {
                    warn!(path = %req.path(), "Rejected revoked token");
                    let response = HttpResponse::Unauthorized()
                        .insert_header(ContentType::plaintext())
                        .body(REVOKED_TOKEN_MESSAGE);
                    return Ok(req.into_response(response).map_into_right_body());
                }
                AuthOutcome::Authenticated(authenticated) => {
                    let context = AuthContext::from(authenticated);
                    debug!(user_id = %context.user_id, "Request authenticated");
                    req.extensions_mut().insert(context);
                }
                AuthOutcome::Anonymous(reason) => {
                    debug!(?reason, path = %req.path(), "Bearer token ignored, continuing anonymously");
                }
            }

            service.call(req).await.map(ServiceResponse::map_into_left_body)
        })
    }
}

/// Token from an `Authorization: Bearer <token>` header
pub fn extract_bearer_token(headers: &actix_web::http::header::HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or(ApiError::Unauthenticated);

        ready(result)
    }
}

/// Extractor for optional authentication
pub struct OptionalAuth(pub Option<AuthContext>);

impl FromRequest for OptionalAuth {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let auth = req.extensions().get::<AuthContext>().cloned();
        ready(Ok(OptionalAuth(auth)))
    }
}
