//! Authentication module
//!
//! This module provides:
//! - Bearer token authentication (revocation, verification, principal lookup)
//! - User registration and login
//! - Token refresh and logout

mod authenticator;
mod config;
mod principal;
mod service;

#[cfg(test)]
mod tests;

pub use authenticator::{AnonymousReason, AuthOutcome, Authenticator};
pub use config::AuthServiceConfig;
pub use principal::{AuthenticatedPrincipal, Principal, PrincipalLoader, UserPrincipalLoader};
pub use service::{AuthService, RegisterCommand};
