//! Unit tests for mock user repository

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError};
use crate::repositories::user::{MockUserRepository, UserRepository};

#[tokio::test]
async fn test_create_and_find_by_id() {
    let repo = MockUserRepository::new();

    let user = User::new("alice@example.com".to_string(), "$2b$hash".to_string());

    let created = repo.create(user.clone()).await.unwrap();
    assert_eq!(created.id, user.id);

    let found = repo.find_by_id(user.id).await.unwrap();
    assert!(found.is_some());
    assert_eq!(found.unwrap().email, "alice@example.com");
}

#[tokio::test]
async fn test_find_by_email() {
    let repo = MockUserRepository::new();

    let user = User::new("bob@example.com".to_string(), "$2b$hash".to_string());
    repo.create(user.clone()).await.unwrap();

    let found = repo.find_by_email("bob@example.com").await.unwrap();
    assert!(found.is_some());
    assert_eq!(found.unwrap().id, user.id);

    let missing = repo.find_by_email("nobody@example.com").await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let repo = MockUserRepository::new();

    let first = User::new("same@example.com".to_string(), "$2b$one".to_string());
    let second = User::new("same@example.com".to_string(), "$2b$two".to_string());

    repo.create(first).await.unwrap();
    let result = repo.create(second).await;

    assert!(matches!(
        result.unwrap_err(),
        DomainError::Auth(AuthError::UserAlreadyExists)
    ));
}

#[tokio::test]
async fn test_find_by_verification_token() {
    let repo = MockUserRepository::new();

    let mut user = User::new("carol@example.com".to_string(), "$2b$hash".to_string());
    user.set_verification_token("opaque-token".to_string(), Utc::now() + Duration::hours(24));
    repo.create(user.clone()).await.unwrap();

    let found = repo
        .find_by_verification_token("opaque-token")
        .await
        .unwrap();
    assert!(found.is_some());
    assert_eq!(found.unwrap().id, user.id);

    let missing = repo.find_by_verification_token("other").await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_update_persists_enabled_flag() {
    let repo = MockUserRepository::new();

    let mut user = User::new("dave@example.com".to_string(), "$2b$hash".to_string());
    repo.create(user.clone()).await.unwrap();
    assert!(!user.enabled);

    user.enable();
    let updated = repo.update(user.clone()).await.unwrap();
    assert!(updated.enabled);

    let found = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert!(found.enabled);
}

#[tokio::test]
async fn test_update_unknown_user_fails() {
    let repo = MockUserRepository::new();
    let user = User::new("ghost@example.com".to_string(), "$2b$hash".to_string());

    let result = repo.update(user).await;
    assert!(matches!(
        result.unwrap_err(),
        DomainError::NotFound { .. }
    ));
}

#[tokio::test]
async fn test_delete() {
    let repo = MockUserRepository::new();

    let user = User::new("erin@example.com".to_string(), "$2b$hash".to_string());
    repo.create(user.clone()).await.unwrap();

    assert!(repo.delete(user.id).await.unwrap());
    assert!(repo.find_by_id(user.id).await.unwrap().is_none());

    // Deleting again reports false
    assert!(!repo.delete(Uuid::new_v4()).await.unwrap());
}
