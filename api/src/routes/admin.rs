use actix_web::{web, HttpResponse};

use tm_core::UserRole;
use tm_shared::types::ApiResponse;

use crate::dto::admin::{RateLimitStatusView, SecurityStatusResponse};
use crate::handlers::error::ApiError;
use crate::middleware::auth::AuthContext;
use crate::state::AppState;

/// Handler for GET /api/v1/admin/security-status
///
/// Shows whether the shared cache backs revocation and rate limiting right
/// now, or whether this instance is running degraded.
pub async fn security_status(state: web::Data<AppState>, auth: AuthContext) -> Result<HttpResponse, ApiError> {
    auth.require_any_role(&[UserRole::Admin])?;

    let policy = state.rate_limiter.policy();
    let body = SecurityStatusResponse {
        revocation_cache: state.revocations.primary_status().await,
        local_revocations: state.revocations.local_record_count(),
        rate_limit: RateLimitStatusView {
            enabled: state.rate_limit.enabled,
            max_requests: policy.max_requests,
            window_seconds: policy.window.as_secs(),
            backend: state.rate_limiter.backend_name().map(str::to_string),
            skip_paths: state.rate_limit.skip_paths.clone(),
        },
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(body)))
}
