use actix_web::{web, HttpRequest, HttpResponse};

use tm_shared::types::ApiResponse;

use super::refresh::refresh_token_header;
use crate::handlers::error::ApiError;
use crate::middleware::auth::{extract_bearer_token, OptionalAuth};
use crate::state::AppState;

/// Handler for POST /api/v1/auth/logout
///
/// Revokes the presented access token and, when `X-Refresh-Token` belongs to
/// the same user, the refresh token too. Both stay rejected until they would
/// have expired anyway.
///
/// # Headers
///
/// ```text
/// Authorization: Bearer {access_token}
/// X-Refresh-Token: {refresh_token}    (optional)
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "message": "Logged out successfully"
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Missing or malformed Authorization header
/// - 401 Unauthorized: Access token invalid or already revoked
pub async fn logout(
    req: HttpRequest,
    state: web::Data<AppState>,
    auth: OptionalAuth,
) -> Result<HttpResponse, ApiError> {
    let access_token = extract_bearer_token(req.headers())
        .ok_or_else(|| ApiError::BadRequest("Invalid Authorization header".into()))?;
    let auth = auth.0.ok_or(ApiError::Unauthenticated)?;

    let refresh_token = refresh_token_header(&req);
    state
        .auth_service
        .logout(&access_token, refresh_token.as_deref())
        .await?;

    tracing::info!(user_id = %auth.user_id, "User logged out");
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::message("Logged out successfully")))
}
