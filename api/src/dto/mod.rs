pub mod admin;
pub mod auth;

pub use admin::{RateLimitStatusView, SecurityStatusResponse};
pub use auth::{LoginRequest, RegisterRequest, SessionResponse};
