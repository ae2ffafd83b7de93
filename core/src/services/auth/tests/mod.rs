mod authenticator_tests;
mod service_tests;

use std::sync::Arc;
use std::time::Duration;

use crate::repositories::{InMemoryUserRepository, UserRepository};
use crate::services::auth::{AuthService, AuthServiceConfig, Authenticator, RegisterCommand, UserPrincipalLoader};
use crate::services::backend::TieredStore;
use crate::services::revocation::RevocationStore;
use crate::services::token::{TokenCodec, TokenServiceConfig};

/// Wired-up services sharing one user directory and one revocation store
pub(super) struct Fixture {
    pub users: Arc<InMemoryUserRepository>,
    pub codec: Arc<TokenCodec>,
    pub revocations: Arc<RevocationStore>,
    pub auth: AuthService,
    pub authenticator: Authenticator,
}

impl Fixture {
    pub fn new() -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let codec = Arc::new(TokenCodec::new(TokenServiceConfig::new(
            "auth-test-secret-0123456789abcdefghijkl",
        )));
        let revocations = Arc::new(RevocationStore::new(
            codec.clone(),
            TieredStore::fallback_only(Duration::from_millis(250)),
        ));
        let config = AuthServiceConfig {
            password_hash_cost: 4,
            ..Default::default()
        };

        let repo: Arc<dyn UserRepository> = users.clone();
        let auth = AuthService::new(repo.clone(), codec.clone(), revocations.clone(), config);
        let authenticator = Authenticator::new(
            codec.clone(),
            revocations.clone(),
            Arc::new(UserPrincipalLoader::new(repo)),
        );

        Self {
            users,
            codec,
            revocations,
            auth,
            authenticator,
        }
    }
}

pub(super) fn register_command(email: &str, role: Option<&str>) -> RegisterCommand {
    RegisterCommand {
        first_name: "Grace".to_string(),
        last_name: "Hopper".to_string(),
        email: email.to_string(),
        password: "correct-horse".to_string(),
        confirm_password: "correct-horse".to_string(),
        role: role.map(str::to_string),
    }
}
