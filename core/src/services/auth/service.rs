//! Main authentication service implementation

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::token::TokenKind;
use crate::domain::entities::user::{User, UserRole};
use crate::domain::value_objects::AuthResponse;
use crate::errors::{AuthError, DomainError, DomainResult, TokenError, ValidationError};
use crate::repositories::UserRepository;
use crate::services::revocation::RevocationStore;
use crate::services::token::TokenCodec;

use super::config::AuthServiceConfig;

/// Input of the register flow
#[derive(Debug, Clone)]
pub struct RegisterCommand {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    /// Requested role, `admin`/`ROLE_ADMIN` or anything else for a regular user
    pub role: Option<String>,
}

/// Authentication service for register, login, refresh and logout
pub struct AuthService {
    /// User repository for account lookups
    users: Arc<dyn UserRepository>,
    /// Token codec for issuing session tokens
    codec: Arc<TokenCodec>,
    /// Revocation store used by logout and refresh
    revocations: Arc<RevocationStore>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        codec: Arc<TokenCodec>,
        revocations: Arc<RevocationStore>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            users,
            codec,
            revocations,
            config,
        }
    }

    /// Register a new account and sign it in
    ///
    /// Fails when registration is disabled, the passwords differ, the email
    /// is malformed or already taken, or the password is too short.
    pub async fn register(&self, command: RegisterCommand) -> DomainResult<AuthResponse> {
        if !self.config.allow_registration {
            return Err(DomainError::Validation {
                message: "Registration is disabled".to_string(),
            });
        }
        if command.password != command.confirm_password {
            return Err(AuthError::PasswordMismatch.into());
        }
        validate_email(&command.email)?;
        if command.password.len() < self.config.min_password_length {
            return Err(ValidationError::InvalidLength {
                field: "password".to_string(),
                min: self.config.min_password_length,
                actual: command.password.len(),
            }
            .into());
        }
        if self.users.exists_by_email(&command.email).await? {
            return Err(AuthError::UserAlreadyExists.into());
        }

        let role = UserRole::resolve(command.role.as_deref());
        let password_hash = self.hash_password(command.password).await?;
        let user = User::new(
            command.first_name.trim(),
            command.last_name.trim(),
            command.email,
            password_hash,
            role,
        );
        let user = self.users.create(user).await?;

        tracing::info!(user_id = %user.id, role = %user.role, "User registered");
        self.issue_for(&user)
    }

    /// Authenticate with email and password
    ///
    /// Unknown emails and wrong passwords produce the same error.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResponse> {
        let mut user = self
            .users
            .find_by_email(email)
            .await?
            .filter(|u| !u.is_deleted)
            .ok_or(AuthError::InvalidCredentials)?;

        if !self.verify_password(password, &user.password_hash).await? {
            tracing::debug!(user_id = %user.id, "Login rejected: wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }
        if !user.can_authenticate() {
            return Err(AuthError::AccountDisabled.into());
        }

        user.update_last_login();
        let user = self.users.update(user).await?;

        tracing::info!(user_id = %user.id, "User logged in");
        self.issue_for(&user)
    }

    /// Exchange a refresh token for a new token pair
    ///
    /// A verified refresh token is revoked before any account checks, so it
    /// is spent even when the refresh then fails. The revocation check and
    /// the revocation are two separate store calls: concurrent refreshes of
    /// the same token that both pass the check each receive a new pair.
    pub async fn refresh(&self, refresh_token: &str) -> DomainResult<AuthResponse> {
        if self.revocations.is_revoked(refresh_token).await {
            return Err(TokenError::TokenRevoked.into());
        }

        let verified = self.codec.verify_kind(refresh_token, TokenKind::Refresh)?;
        self.revocations.revoke(refresh_token).await;

        let user_id = Uuid::parse_str(&verified.subject).map_err(|_| TokenError::InvalidToken)?;
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::PrincipalNotFound)?;
        if !user.can_authenticate() {
            return Err(AuthError::AccountDisabled.into());
        }

        let response = self.issue_for(&user)?;

        tracing::debug!(user_id = %user.id, "Token pair refreshed");
        Ok(response)
    }

    /// Revoke the presented access token and, when given, the refresh token
    /// of the same session
    pub async fn logout(&self, access_token: &str, refresh_token: Option<&str>) -> DomainResult<()> {
        self.revocations.revoke(access_token).await;

        if let Some(refresh_token) = refresh_token {
            let access = self.codec.verify(access_token).ok();
            let refresh = self.codec.verify_kind(refresh_token, TokenKind::Refresh).ok();

            match (access, refresh) {
                (Some(access), Some(refresh)) if access.subject == refresh.subject => {
                    self.revocations.revoke(refresh_token).await;
                }
                _ => tracing::debug!("Ignoring refresh token that does not belong to the session"),
            }
        }

        Ok(())
    }

    /// Load the account behind an authenticated request
    pub async fn current_user(&self, user_id: Uuid) -> DomainResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .filter(|u| !u.is_deleted)
            .ok_or_else(|| DomainError::NotFound {
                resource: "User".to_string(),
            })
    }

    fn issue_for(&self, user: &User) -> DomainResult<AuthResponse> {
        let pair = self.codec.issue_pair(&user.subject())?;
        Ok(AuthResponse::from_token_pair(pair, user))
    }

    async fn hash_password(&self, password: String) -> DomainResult<String> {
        let cost = self.config.password_hash_cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| DomainError::internal(format!("Password hashing task failed: {}", e)))?
            .map_err(|e| DomainError::internal(format!("Password hashing failed: {}", e)))
    }

    async fn verify_password(&self, password: &str, hash: &str) -> DomainResult<bool> {
        let password = password.to_string();
        let hash = hash.to_string();
        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| DomainError::internal(format!("Password check task failed: {}", e)))?
            .map_err(|e| DomainError::internal(format!("Password check failed: {}", e)))
    }
}

fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::RequiredField {
            field: "email".to_string(),
        });
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(ValidationError::InvalidEmail),
    }
}
