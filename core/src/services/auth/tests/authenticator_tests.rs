//! Unit tests for bearer token authentication

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::{register_command, Fixture};
use crate::domain::entities::token::TokenKind;
use crate::domain::entities::user::UserRole;
use crate::errors::DomainError;
use crate::repositories::UserRepository;
use crate::services::auth::{AnonymousReason, AuthOutcome, Authenticator, Principal, PrincipalLoader};

/// Resolves every subject to the same unrelated principal
struct ImpostorLoader;

#[async_trait]
impl PrincipalLoader for ImpostorLoader {
    async fn load_principal(&self, _subject: &str) -> Result<Principal, DomainError> {
        Ok(Principal {
            user_id: Uuid::new_v4(),
            email: "impostor@example.com".to_string(),
            roles: vec![UserRole::Admin],
        })
    }
}

#[tokio::test]
async fn test_valid_access_token_authenticates() {
    let fx = Fixture::new();
    let session = fx.auth.register(register_command("grace@example.com", None)).await.unwrap();

    match fx.authenticator.authenticate(&session.access_token).await {
        AuthOutcome::Authenticated(auth) => {
            assert_eq!(auth.principal.user_id, session.user.id);
            assert_eq!(auth.principal.email, "grace@example.com");
            assert_eq!(auth.principal.roles, vec![UserRole::User]);
            assert!(auth.token_expires_at > Utc::now());
        }
        other => panic!("expected authenticated, got {:?}", other),
    }
}

#[tokio::test]
async fn test_revoked_token_is_terminal() {
    let fx = Fixture::new();
    let session = fx.auth.register(register_command("grace@example.com", None)).await.unwrap();

    fx.revocations.revoke(&session.access_token).await;
    assert_eq!(fx.authenticator.authenticate(&session.access_token).await, AuthOutcome::Revoked);
}

#[tokio::test]
async fn test_garbage_token_is_anonymous() {
    let fx = Fixture::new();
    assert_eq!(
        fx.authenticator.authenticate("garbage").await,
        AuthOutcome::Anonymous(AnonymousReason::InvalidToken)
    );
}

#[tokio::test]
async fn test_refresh_token_cannot_authenticate_requests() {
    let fx = Fixture::new();
    let session = fx.auth.register(register_command("grace@example.com", None)).await.unwrap();

    assert_eq!(
        fx.authenticator.authenticate(&session.refresh_token).await,
        AuthOutcome::Anonymous(AnonymousReason::InvalidToken)
    );
}

#[tokio::test]
async fn test_unknown_subject_is_anonymous() {
    let fx = Fixture::new();
    let token = fx.codec.issue(&Uuid::new_v4().to_string(), TokenKind::Access).unwrap();

    assert_eq!(
        fx.authenticator.authenticate(&token).await,
        AuthOutcome::Anonymous(AnonymousReason::PrincipalNotFound)
    );
}

#[tokio::test]
async fn test_non_uuid_subject_is_anonymous() {
    let fx = Fixture::new();
    let token = fx.codec.issue("grace@example.com", TokenKind::Access).unwrap();

    assert_eq!(
        fx.authenticator.authenticate(&token).await,
        AuthOutcome::Anonymous(AnonymousReason::PrincipalNotFound)
    );
}

#[tokio::test]
async fn test_locked_account_is_anonymous() {
    let fx = Fixture::new();
    let session = fx.auth.register(register_command("grace@example.com", None)).await.unwrap();

    let mut user = fx.users.find_by_id(session.user.id).await.unwrap().unwrap();
    user.lock();
    fx.users.update(user).await.unwrap();

    assert_eq!(
        fx.authenticator.authenticate(&session.access_token).await,
        AuthOutcome::Anonymous(AnonymousReason::PrincipalNotFound)
    );
}

#[tokio::test]
async fn test_principal_must_match_subject() {
    let fx = Fixture::new();
    let authenticator = Authenticator::new(fx.codec.clone(), fx.revocations.clone(), Arc::new(ImpostorLoader));
    let token = fx.codec.issue(&Uuid::new_v4().to_string(), TokenKind::Access).unwrap();

    assert_eq!(
        authenticator.authenticate(&token).await,
        AuthOutcome::Anonymous(AnonymousReason::SubjectMismatch)
    );
}
