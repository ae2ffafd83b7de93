//! Application factory
//!
//! Middleware order on the way in: request tracing, then rate limiting, then
//! authentication, then the route. actix-web runs the last `wrap` first.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, HttpResponse,
};
use tracing_actix_web::TracingLogger;

use tm_shared::errors::{error_codes, ErrorResponse};

use crate::handlers::error::ApiError;
use crate::middleware::{AuthenticationFilter, RateLimitFilter};
use crate::routes;
use crate::state::AppState;

/// Create and configure the application with all dependencies
pub fn create_app(
    state: web::Data<AppState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let authentication = AuthenticationFilter::new(state.authenticator.clone());
    let rate_limit = RateLimitFilter::new(state.rate_limiter.clone(), state.rate_limit.clone());

    App::new()
        .app_data(state)
        .app_data(web::JsonConfig::default().error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into()))
        .wrap(authentication)
        .wrap(rate_limit)
        .wrap(TracingLogger::default())
        .configure(routes::configure)
        .default_service(web::route().to(not_found))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
