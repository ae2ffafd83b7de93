use actix_web::{web, HttpResponse};
use validator::Validate;

use tm_shared::types::ApiResponse;

use crate::dto::auth::LoginRequest;
use crate::handlers::error::ApiError;
use crate::state::AppState;

/// Handler for POST /api/v1/auth/login
///
/// Unknown email and wrong password produce the same 401.
pub async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    request.validate()?;

    let response = state.auth_service.login(&request.email, &request.password).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(response).with_message("Login successful")))
}
