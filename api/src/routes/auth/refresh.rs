use actix_web::{web, HttpRequest, HttpResponse};

use tm_shared::types::ApiResponse;

use super::REFRESH_TOKEN_HEADER;
use crate::handlers::error::ApiError;
use crate::state::AppState;

/// Handler for POST /api/v1/auth/refresh-token
///
/// Exchanges the refresh token in `X-Refresh-Token` for a new token pair.
/// The presented refresh token is revoked, so it works exactly once.
///
/// # Errors
/// - 400 Bad Request: Header missing
/// - 401 Unauthorized: Token invalid, expired, revoked or not a refresh token
pub async fn refresh(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let refresh_token = refresh_token_header(&req)
        .ok_or_else(|| ApiError::BadRequest(format!("{} header is required", REFRESH_TOKEN_HEADER)))?;

    let response = state.auth_service.refresh(&refresh_token).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(response).with_message("Token refreshed")))
}

pub(crate) fn refresh_token_header(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(REFRESH_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}
