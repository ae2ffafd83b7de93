use actix_web::{web, HttpResponse};

use tm_core::{UserRole, UserSummary};
use tm_shared::types::ApiResponse;

use crate::handlers::error::ApiError;
use crate::middleware::auth::AuthContext;
use crate::state::AppState;

/// Handler for GET /api/v1/users/me
pub async fn me(state: web::Data<AppState>, auth: AuthContext) -> Result<HttpResponse, ApiError> {
    auth.require_any_role(&[UserRole::User, UserRole::Admin])?;

    let user = state.auth_service.current_user(auth.user_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(UserSummary::from(&user))))
}
