pub mod auth;
pub mod rate_limit;

pub use auth::{extract_bearer_token, AuthContext, AuthenticationFilter, OptionalAuth};
pub use rate_limit::RateLimitFilter;
