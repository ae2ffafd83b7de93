//! Domain-specific error types for authentication, tokens and storage backends
//!
//! Messages here are safe to show to API clients. Underlying causes (JWT
//! decoding failures, Redis errors) are logged where they occur and never
//! carried into these variants.

use std::time::Duration;
use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Account is disabled")]
    AccountDisabled,

    #[error("Principal not found")]
    PrincipalNotFound,
}

/// Token-related errors
///
/// Verification failures collapse into [`TokenError::InvalidToken`]: a client
/// cannot tell a forged token from an expired or malformed one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token is blacklisted")]
    TokenRevoked,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Failures talking to a storage backend (shared cache or fallback)
///
/// None of these are terminal on the request path: callers switch to the
/// fallback tier or allow the request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("Backend unavailable: {message}")]
    Unavailable { message: String },

    #[error("Backend timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("Backend not configured")]
    NotConfigured,
}

impl BackendError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

/// Validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid length: {field} (min: {min}, actual: {actual})")]
    InvalidLength {
        field: String,
        min: usize,
        actual: usize,
    },

    #[error("Invalid email")]
    InvalidEmail,
}
