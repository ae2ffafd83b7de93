use actix_web::{web, HttpResponse};
use validator::Validate;

use tm_shared::types::ApiResponse;

use crate::dto::auth::RegisterRequest;
use crate::handlers::error::ApiError;
use crate::state::AppState;

/// Handler for POST /api/v1/auth/register
///
/// Creates an account and returns a fresh token pair.
///
/// # Response
///
/// ## Success (201 Created)
/// ```json
/// {
///     "success": true,
///     "message": "Registration successful",
///     "data": { "access_token": "...", "refresh_token": "...", "token_type": "Bearer", "expires_in": 900, "user": { ... } }
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Field validation failed or passwords differ
/// - 409 Conflict: Email already registered
pub async fn register(
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = request.into_inner();
    request.validate()?;

    let response = state.auth_service.register(request.into()).await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(response).with_message("Registration successful")))
}
