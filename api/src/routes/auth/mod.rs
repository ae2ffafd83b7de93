//! Authentication route handlers
//!
//! This module contains the session lifecycle endpoints:
//! - Registration and login
//! - Token refresh
//! - Logout
//! - Session introspection

pub mod login;
pub mod logout;
pub mod refresh;
pub mod register;
pub mod session;

/// Header carrying the refresh token on refresh and logout
pub const REFRESH_TOKEN_HEADER: &str = "X-Refresh-Token";
