//! Unit tests for domain error types

use std::time::Duration;

use super::{AuthError, BackendError, DomainError, TokenError, ValidationError};

#[test]
fn test_revoked_token_message_is_fixed() {
    assert_eq!(TokenError::TokenRevoked.to_string(), "Token is blacklisted");
}

#[test]
fn test_invalid_token_hides_reason() {
    assert_eq!(TokenError::InvalidToken.to_string(), "Invalid token");
}

#[test]
fn test_backend_timeout_message() {
    let error = BackendError::Timeout(Duration::from_millis(250));
    assert_eq!(error.to_string(), "Backend timed out after 250ms");
}

#[test]
fn test_domain_error_is_transparent_over_sources() {
    let error: DomainError = AuthError::InvalidCredentials.into();
    assert_eq!(error.to_string(), "Invalid email or password");

    let error: DomainError = BackendError::unavailable("connection refused").into();
    assert!(matches!(error, DomainError::Backend(BackendError::Unavailable { .. })));
    assert!(error.to_string().contains("connection refused"));
}

#[test]
fn test_validation_error_with_fields() {
    let error = ValidationError::InvalidLength {
        field: "password".to_string(),
        min: 8,
        actual: 3,
    };
    let message = error.to_string();
    assert!(message.contains("password"));
    assert!(message.contains("min: 8"));
}
