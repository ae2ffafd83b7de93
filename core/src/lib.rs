//! # TaskMaster Core
//!
//! Domain layer for the TaskMaster backend: user and token entities, the
//! token codec, the revocation store, the rate limiter and the authentication
//! flows built on them. Nothing here knows about HTTP.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{AuthResponse, TokenKind, TokenPair, User, UserRole, UserSummary, VerifiedToken};
pub use errors::{AuthError, BackendError, DomainError, DomainResult, TokenError, ValidationError};
pub use repositories::{InMemoryUserRepository, UserRepository};
pub use services::*;
