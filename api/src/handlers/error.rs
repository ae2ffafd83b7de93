//! Mapping of domain failures onto HTTP responses
//!
//! Every error body is an [`ErrorResponse`] with a fixed code. Internal and
//! backend details are logged, never returned.

use std::collections::HashMap;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use tracing::{error, warn};
use validator::ValidationErrors;

use tm_core::errors::{AuthError, DomainError, TokenError, ValidationError};
use tm_shared::errors::{error_codes, ErrorResponse};

/// Error type returned by handlers and extractors
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Request validation failed")]
    Validation(#[from] ValidationErrors),

    #[error("{0}")]
    BadRequest(String),

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Access denied")]
    Forbidden,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Domain(err) => domain_status(err).0,
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Domain(err) => handle_domain_error(err),
            ApiError::Validation(errors) => HttpResponse::BadRequest().json(validation_response(errors)),
            ApiError::BadRequest(message) => {
                HttpResponse::BadRequest().json(ErrorResponse::new(error_codes::BAD_REQUEST, message.as_str()))
            }
            ApiError::Unauthenticated => HttpResponse::Unauthorized()
                .json(ErrorResponse::new(error_codes::UNAUTHORIZED, "Authentication required")),
            ApiError::Forbidden => {
                HttpResponse::Forbidden().json(ErrorResponse::new(error_codes::FORBIDDEN, "Access denied"))
            }
        }
    }
}

/// Status and error code for a domain error
fn domain_status(error: &DomainError) -> (StatusCode, &'static str) {
    match error {
        DomainError::Auth(auth) => match auth {
            AuthError::InvalidCredentials => (StatusCode::UNAUTHORIZED, error_codes::INVALID_CREDENTIALS),
            AuthError::UserAlreadyExists => (StatusCode::CONFLICT, error_codes::CONFLICT),
            AuthError::PasswordMismatch => (StatusCode::BAD_REQUEST, error_codes::VALIDATION_ERROR),
            AuthError::AccountDisabled => (StatusCode::FORBIDDEN, error_codes::ACCOUNT_DISABLED),
            AuthError::PrincipalNotFound => (StatusCode::UNAUTHORIZED, error_codes::UNAUTHORIZED),
        },
        DomainError::Token(token) => match token {
            TokenError::InvalidToken => (StatusCode::UNAUTHORIZED, error_codes::TOKEN_INVALID),
            TokenError::TokenRevoked => (StatusCode::UNAUTHORIZED, error_codes::TOKEN_REVOKED),
            TokenError::TokenGenerationFailed => (StatusCode::INTERNAL_SERVER_ERROR, error_codes::INTERNAL_ERROR),
        },
        DomainError::Validation { .. } | DomainError::ValidationErr(_) => {
            (StatusCode::BAD_REQUEST, error_codes::VALIDATION_ERROR)
        }
        DomainError::NotFound { .. } => (StatusCode::NOT_FOUND, error_codes::NOT_FOUND),
        DomainError::Backend(_) => (StatusCode::SERVICE_UNAVAILABLE, error_codes::CACHE_ERROR),
        DomainError::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, error_codes::INTERNAL_ERROR),
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    let (status, code) = domain_status(error);

    let message = match error {
        DomainError::Internal { .. } | DomainError::Token(TokenError::TokenGenerationFailed) => {
            error!(error = %error, "Request failed");
            "An internal error occurred".to_string()
        }
        DomainError::Backend(_) => {
            error!(error = %error, "Storage backend failure reached a handler");
            "Service temporarily unavailable".to_string()
        }
        DomainError::Token(TokenError::InvalidToken) => "Invalid or expired token".to_string(),
        DomainError::ValidationErr(ValidationError::InvalidEmail) => "Invalid email format".to_string(),
        DomainError::Validation { message } => message.clone(),
        other => {
            warn!(error = %other, "Request rejected");
            other.to_string()
        }
    };

    HttpResponse::build(status).json(ErrorResponse::new(code, message))
}

/// Field-level validation failures as an error body
pub fn validation_response(errors: &ValidationErrors) -> ErrorResponse {
    let details: HashMap<String, serde_json::Value> = errors
        .field_errors()
        .into_iter()
        .map(|(field, failures)| {
            let messages: Vec<String> = failures
                .iter()
                .map(|failure| {
                    failure
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| failure.code.to_string())
                })
                .collect();
            (field.to_string(), serde_json::json!(messages))
        })
        .collect();

    ErrorResponse::with_details(error_codes::VALIDATION_ERROR, "Request validation failed", details)
}
