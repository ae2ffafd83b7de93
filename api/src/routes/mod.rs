//! HTTP routes
//!
//! - `/health` - liveness, public
//! - `/api/v1/auth/*` - session lifecycle, public
//! - `/api/v1/users/*` - requires `USER` or `ADMIN`
//! - `/api/v1/admin/*` - requires `ADMIN`

pub mod admin;
pub mod auth;
pub mod health;
pub mod users;

use actix_web::web;

/// Register every route under its scope
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check)).service(
        web::scope("/api/v1")
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register::register))
                    .route("/login", web::post().to(auth::login::login))
                    .route("/refresh-token", web::post().to(auth::refresh::refresh))
                    .route("/logout", web::post().to(auth::logout::logout))
                    .route("/session", web::get().to(auth::session::session)),
            )
            .service(web::scope("/users").route("/me", web::get().to(users::me)))
            .service(web::scope("/admin").route("/security-status", web::get().to(admin::security_status))),
    );
}
