use actix_web::HttpResponse;

use tm_shared::types::ApiResponse;

use crate::dto::auth::SessionResponse;
use crate::middleware::auth::OptionalAuth;

/// Handler for GET /api/v1/auth/session
///
/// Reports the identity the authentication filter attached, if any. Never
/// fails for anonymous callers.
pub async fn session(auth: OptionalAuth) -> HttpResponse {
    let body = match auth.0 {
        Some(context) => SessionResponse {
            authenticated: true,
            user_id: Some(context.user_id),
            email: Some(context.email),
            roles: context.roles,
        },
        None => SessionResponse::anonymous(),
    };

    HttpResponse::Ok().json(ApiResponse::success(body))
}
