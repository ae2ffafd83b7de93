use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use tm_core::services::auth::RegisterCommand;
use tm_core::UserRole;

/// Characters that count towards the password special-character rule
const PASSWORD_SPECIALS: &str = "@#$%^&+=";

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 50))]
    pub first_name: String,

    #[validate(length(min = 2, max = 50))]
    pub last_name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// At least 8 characters with a digit, a lowercase letter, an uppercase
    /// letter and one of `@#$%^&+=`
    #[validate(length(min = 8, max = 128), custom = "validate_password_strength")]
    pub password: String,

    #[validate(length(min = 1))]
    pub confirm_password: String,

    /// `USER` or `ADMIN`; anything else registers a regular user
    #[serde(default)]
    pub role: Option<String>,
}

impl From<RegisterRequest> for RegisterCommand {
    fn from(request: RegisterRequest) -> Self {
        Self {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            password: request.password,
            confirm_password: request.confirm_password,
            role: request.role,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Identity attached to the current request, if any
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub roles: Vec<UserRole>,
}

impl SessionResponse {
    pub fn anonymous() -> Self {
        Self {
            authenticated: false,
            user_id: None,
            email: None,
            roles: Vec::new(),
        }
    }
}

fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_special = password.chars().any(|c| PASSWORD_SPECIALS.contains(c));

    if has_digit && has_lower && has_upper && has_special {
        Ok(())
    } else {
        let mut error = ValidationError::new("password_strength");
        error.message =
            Some("Password must contain digit, lowercase, uppercase, and special character".into());
        Err(error)
    }
}
