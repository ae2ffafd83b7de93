//! Unit tests for the authentication service

use super::{register_command, Fixture};
use crate::domain::entities::token::TokenKind;
use crate::domain::entities::user::UserRole;
use crate::errors::{AuthError, DomainError, TokenError, ValidationError};
use crate::repositories::UserRepository;
use crate::services::auth::AuthOutcome;

#[tokio::test]
async fn test_register_issues_tokens_for_new_user() {
    let fx = Fixture::new();
    let response = fx.auth.register(register_command("Grace@Example.com", None)).await.unwrap();

    assert_eq!(response.token_type, "Bearer");
    assert_eq!(response.expires_in, 900);
    assert_eq!(response.user.email, "grace@example.com");
    assert_eq!(response.user.role, UserRole::User);

    let verified = fx.codec.verify_kind(&response.access_token, TokenKind::Access).unwrap();
    assert_eq!(verified.subject, response.user.id.to_string());
    assert!(fx.codec.verify_kind(&response.refresh_token, TokenKind::Refresh).is_ok());
}

#[tokio::test]
async fn test_register_resolves_admin_role() {
    let fx = Fixture::new();
    let response = fx.auth.register(register_command("root@example.com", Some("ROLE_ADMIN"))).await.unwrap();
    assert_eq!(response.user.role, UserRole::Admin);
}

#[tokio::test]
async fn test_register_rejects_password_mismatch() {
    let fx = Fixture::new();
    let mut command = register_command("grace@example.com", None);
    command.confirm_password = "something-else".into();

    let result = fx.auth.register(command).await;
    assert!(matches!(result, Err(DomainError::Auth(AuthError::PasswordMismatch))));
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let fx = Fixture::new();
    let mut command = register_command("grace@example.com", None);
    command.password = "short".into();
    command.confirm_password = "short".into();

    let result = fx.auth.register(command).await;
    assert!(matches!(
        result,
        Err(DomainError::ValidationErr(ValidationError::InvalidLength { .. }))
    ));
}

#[tokio::test]
async fn test_register_rejects_invalid_email() {
    let fx = Fixture::new();
    let result = fx.auth.register(register_command("not-an-email", None)).await;
    assert!(matches!(result, Err(DomainError::ValidationErr(ValidationError::InvalidEmail))));
}

#[tokio::test]
async fn test_register_rejects_duplicate_email() {
    let fx = Fixture::new();
    fx.auth.register(register_command("grace@example.com", None)).await.unwrap();

    let result = fx.auth.register(register_command("GRACE@example.com", None)).await;
    assert!(matches!(result, Err(DomainError::Auth(AuthError::UserAlreadyExists))));
}

#[tokio::test]
async fn test_login_with_correct_password() {
    let fx = Fixture::new();
    fx.auth.register(register_command("grace@example.com", None)).await.unwrap();

    let response = fx.auth.login("grace@example.com", "correct-horse").await.unwrap();
    let user = fx.users.find_by_id(response.user.id).await.unwrap().unwrap();
    assert!(user.last_login_at.is_some());
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let fx = Fixture::new();
    fx.auth.register(register_command("grace@example.com", None)).await.unwrap();

    let wrong_password = fx.auth.login("grace@example.com", "wrong-password").await;
    let unknown_email = fx.auth.login("nobody@example.com", "correct-horse").await;

    assert!(matches!(wrong_password, Err(DomainError::Auth(AuthError::InvalidCredentials))));
    assert!(matches!(unknown_email, Err(DomainError::Auth(AuthError::InvalidCredentials))));
}

#[tokio::test]
async fn test_login_rejects_locked_account() {
    let fx = Fixture::new();
    let session = fx.auth.register(register_command("grace@example.com", None)).await.unwrap();
    let mut user = fx.users.find_by_id(session.user.id).await.unwrap().unwrap();
    user.lock();
    fx.users.update(user).await.unwrap();

    let result = fx.auth.login("grace@example.com", "correct-horse").await;
    assert!(matches!(result, Err(DomainError::Auth(AuthError::AccountDisabled))));
}

#[tokio::test]
async fn test_refresh_rotates_refresh_token() {
    let fx = Fixture::new();
    let session = fx.auth.register(register_command("grace@example.com", None)).await.unwrap();

    let refreshed = fx.auth.refresh(&session.refresh_token).await.unwrap();
    assert_ne!(refreshed.access_token, session.access_token);
    assert!(fx.revocations.is_revoked(&session.refresh_token).await);

    let replay = fx.auth.refresh(&session.refresh_token).await;
    assert!(matches!(replay, Err(DomainError::Token(TokenError::TokenRevoked))));
}

#[tokio::test]
async fn test_refresh_spends_token_when_account_locked() {
    let fx = Fixture::new();
    let session = fx.auth.register(register_command("grace@example.com", None)).await.unwrap();
    let mut user = fx.users.find_by_id(session.user.id).await.unwrap().unwrap();
    user.lock();
    fx.users.update(user.clone()).await.unwrap();

    let locked = fx.auth.refresh(&session.refresh_token).await;
    assert!(matches!(locked, Err(DomainError::Auth(AuthError::AccountDisabled))));
    assert!(fx.revocations.is_revoked(&session.refresh_token).await);

    user.unlock();
    fx.users.update(user).await.unwrap();
    let retry = fx.auth.refresh(&session.refresh_token).await;
    assert!(matches!(retry, Err(DomainError::Token(TokenError::TokenRevoked))));
}

#[tokio::test]
async fn test_refresh_rejects_access_token() {
    let fx = Fixture::new();
    let session = fx.auth.register(register_command("grace@example.com", None)).await.unwrap();

    let result = fx.auth.refresh(&session.access_token).await;
    assert!(matches!(result, Err(DomainError::Token(TokenError::InvalidToken))));
}

#[tokio::test]
async fn test_logout_revokes_session_tokens() {
    let fx = Fixture::new();
    let session = fx.auth.register(register_command("grace@example.com", None)).await.unwrap();

    fx.auth
        .logout(&session.access_token, Some(&session.refresh_token))
        .await
        .unwrap();

    assert_eq!(fx.authenticator.authenticate(&session.access_token).await, AuthOutcome::Revoked);
    assert!(fx.revocations.is_revoked(&session.refresh_token).await);
}

#[tokio::test]
async fn test_logout_ignores_foreign_refresh_token() {
    let fx = Fixture::new();
    let mine = fx.auth.register(register_command("grace@example.com", None)).await.unwrap();
    let theirs = fx.auth.register(register_command("alan@example.com", None)).await.unwrap();

    fx.auth.logout(&mine.access_token, Some(&theirs.refresh_token)).await.unwrap();

    assert!(fx.revocations.is_revoked(&mine.access_token).await);
    assert!(!fx.revocations.is_revoked(&theirs.refresh_token).await);
}

#[tokio::test]
async fn test_current_user() {
    let fx = Fixture::new();
    let session = fx.auth.register(register_command("grace@example.com", None)).await.unwrap();

    let user = fx.auth.current_user(session.user.id).await.unwrap();
    assert_eq!(user.email, "grace@example.com");

    let missing = fx.auth.current_user(uuid::Uuid::new_v4()).await;
    assert!(matches!(missing, Err(DomainError::NotFound { .. })));
}
