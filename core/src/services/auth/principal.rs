//! Principal resolution for authenticated requests

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::user::{User, UserRole};
use crate::errors::{AuthError, DomainError};
use crate::repositories::UserRepository;

/// Identity resolved from a token subject
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: Uuid,
    pub email: String,
    pub roles: Vec<UserRole>,
}

impl Principal {
    /// Canonical identity string; equals the subject of tokens issued to it
    pub fn identity(&self) -> String {
        self.user_id.to_string()
    }
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            roles: user.roles(),
        }
    }
}

/// Principal attached to a single request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedPrincipal {
    pub principal: Principal,
    /// Expiry of the token the request presented
    pub token_expires_at: DateTime<Utc>,
}

/// "Load principal by identifier" capability
#[async_trait]
pub trait PrincipalLoader: Send + Sync {
    /// Resolves a token subject. Unknown, deleted, inactive and locked
    /// accounts all yield `AuthError::PrincipalNotFound`.
    async fn load_principal(&self, subject: &str) -> Result<Principal, DomainError>;
}

/// Loads principals from the user repository
pub struct UserPrincipalLoader {
    users: Arc<dyn UserRepository>,
}

impl UserPrincipalLoader {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl PrincipalLoader for UserPrincipalLoader {
    async fn load_principal(&self, subject: &str) -> Result<Principal, DomainError> {
        let id = Uuid::parse_str(subject).map_err(|_| AuthError::PrincipalNotFound)?;

        match self.users.find_by_id(id).await? {
            Some(user) if user.can_authenticate() => Ok(Principal::from(&user)),
            _ => Err(AuthError::PrincipalNotFound.into()),
        }
    }
}
