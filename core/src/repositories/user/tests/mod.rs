//! Unit tests for the in-process user repository

use uuid::Uuid;

use crate::domain::entities::user::{User, UserRole};
use crate::errors::{AuthError, DomainError};
use crate::repositories::user::{InMemoryUserRepository, UserRepository};

fn user(email: &str, role: UserRole) -> User {
    User::new("Test", "User", email, "$2b$04$hash", role)
}

#[tokio::test]
async fn test_create_and_find() {
    let repo = InMemoryUserRepository::new();
    let created = repo.create(user("one@example.com", UserRole::User)).await.unwrap();

    let by_id = repo.find_by_id(created.id).await.unwrap();
    assert_eq!(by_id.map(|u| u.email), Some("one@example.com".to_string()));

    let by_email = repo.find_by_email("ONE@example.com").await.unwrap();
    assert_eq!(by_email.map(|u| u.id), Some(created.id));
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let repo = InMemoryUserRepository::new();
    repo.create(user("dup@example.com", UserRole::User)).await.unwrap();

    let result = repo.create(user("Dup@Example.com", UserRole::Admin)).await;
    assert!(matches!(result, Err(DomainError::Auth(AuthError::UserAlreadyExists))));
    assert!(repo.exists_by_email("dup@example.com").await.unwrap());
}

#[tokio::test]
async fn test_update_unknown_user_fails() {
    let repo = InMemoryUserRepository::new();
    let mut ghost = user("ghost@example.com", UserRole::User);
    ghost.id = Uuid::new_v4();

    let result = repo.update(ghost).await;
    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_count_by_role() {
    let repo = InMemoryUserRepository::new();
    repo.create(user("a@example.com", UserRole::User)).await.unwrap();
    repo.create(user("b@example.com", UserRole::User)).await.unwrap();
    repo.create(user("c@example.com", UserRole::Admin)).await.unwrap();

    assert_eq!(repo.count_by_role(None).await.unwrap(), 3);
    assert_eq!(repo.count_by_role(Some(UserRole::Admin)).await.unwrap(), 1);
}
