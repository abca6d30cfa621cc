//! Unit tests for the verification token service

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use sigil_shared::config::VerificationConfig;

use crate::domain::entities::token::{Claims, RefreshClaims, TokenKind};
use crate::domain::entities::user::User;
use crate::errors::{DomainError, VerificationError};
use crate::repositories::{MockRefreshTokenRepository, MockUserRepository, UserRepository};
use crate::services::token::RefreshTokenStore;
use crate::services::verification::{
    MockPasswordHasher, VerificationPurpose, VerificationTokenService,
};

type TestService =
    VerificationTokenService<MockUserRepository, MockRefreshTokenRepository, MockPasswordHasher>;

struct Fixture {
    service: TestService,
    users: Arc<MockUserRepository>,
    tokens: Arc<MockRefreshTokenRepository>,
    store: RefreshTokenStore<MockRefreshTokenRepository>,
}

fn fixture() -> Fixture {
    let users = Arc::new(MockUserRepository::new());
    let tokens = Arc::new(MockRefreshTokenRepository::new());
    let store = RefreshTokenStore::new(tokens.clone(), "test-hash-key");
    let service = VerificationTokenService::new(
        users.clone(),
        store.clone(),
        Arc::new(MockPasswordHasher),
        VerificationConfig::default(),
    );
    Fixture {
        service,
        users,
        tokens,
        store,
    }
}

async fn seeded_user(fx: &Fixture, email: &str) -> User {
    let user = User::new(email.to_string(), "hashed:original".to_string());
    fx.users.insert(user.clone()).await;
    user
}

#[tokio::test]
async fn test_issue_persists_token_and_expiry() {
    let fx = fixture();
    let user = seeded_user(&fx, "alice@example.com").await;

    let before = Utc::now();
    let token = fx
        .service
        .issue(&user, VerificationPurpose::EmailConfirmation)
        .await
        .unwrap();

    let stored = fx.users.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(stored.verification_token.as_deref(), Some(token.as_str()));

    // 24 hour confirmation window
    let expiry = stored.verification_token_expiry.unwrap();
    assert!(expiry >= before + Duration::hours(24));
    assert!(expiry <= Utc::now() + Duration::hours(24));
}

#[tokio::test]
async fn test_issue_overwrites_previous_token() {
    let fx = fixture();
    let user = seeded_user(&fx, "alice@example.com").await;

    let first = fx
        .service
        .issue(&user, VerificationPurpose::EmailConfirmation)
        .await
        .unwrap();
    let stored = fx.users.find_by_id(user.id).await.unwrap().unwrap();
    let second = fx
        .service
        .issue(&stored, VerificationPurpose::PasswordReset)
        .await
        .unwrap();

    assert_ne!(first, second);

    // The single slot now holds only the newer token
    assert!(fx
        .users
        .find_by_verification_token(&first)
        .await
        .unwrap()
        .is_none());
    assert!(fx
        .users
        .find_by_verification_token(&second)
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn test_reset_window_is_minutes_not_hours() {
    let fx = fixture();
    let user = seeded_user(&fx, "alice@example.com").await;

    fx.service
        .issue(&user, VerificationPurpose::PasswordReset)
        .await
        .unwrap();

    let stored = fx.users.find_by_id(user.id).await.unwrap().unwrap();
    let expiry = stored.verification_token_expiry.unwrap();
    assert!(expiry <= Utc::now() + Duration::minutes(10));
    assert!(expiry > Utc::now() + Duration::minutes(9));
}

#[tokio::test]
async fn test_email_verification_enables_and_clears() {
    let fx = fixture();
    let user = seeded_user(&fx, "alice@example.com").await;

    let token = fx
        .service
        .issue(&user, VerificationPurpose::EmailConfirmation)
        .await
        .unwrap();
    let verified = fx
        .service
        .consume_for_email_verification(&token)
        .await
        .unwrap();

    assert!(verified.enabled);
    assert!(verified.verification_token.is_none());
    assert!(verified.verification_token_expiry.is_none());
}

#[tokio::test]
async fn test_token_is_single_use() {
    let fx = fixture();
    let user = seeded_user(&fx, "alice@example.com").await;

    let token = fx
        .service
        .issue(&user, VerificationPurpose::EmailConfirmation)
        .await
        .unwrap();

    fx.service
        .consume_for_email_verification(&token)
        .await
        .unwrap();
    let err = fx
        .service
        .consume_for_email_verification(&token)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DomainError::Verification(VerificationError::NotFound)
    ));
}

#[tokio::test]
async fn test_unknown_token_is_not_found() {
    let fx = fixture();

    let err = fx
        .service
        .consume_for_email_verification(&Uuid::new_v4().to_string())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DomainError::Verification(VerificationError::NotFound)
    ));
}

#[tokio::test]
async fn test_expired_token_reports_same_as_unknown() {
    let fx = fixture();
    let user = seeded_user(&fx, "alice@example.com").await;

    // Plant a token whose expiry is already in the past
    let mut stale = fx.users.find_by_id(user.id).await.unwrap().unwrap();
    stale.set_verification_token(
        "expired-token".to_string(),
        Utc::now() - Duration::minutes(1),
    );
    fx.users.update(stale).await.unwrap();

    let err = fx
        .service
        .consume_for_email_verification("expired-token")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DomainError::Verification(VerificationError::NotFound)
    ));

    // The account stays disabled
    let unchanged = fx.users.find_by_id(user.id).await.unwrap().unwrap();
    assert!(!unchanged.enabled);
}

#[tokio::test]
async fn test_password_reset_installs_new_hash() {
    let fx = fixture();
    let user = seeded_user(&fx, "alice@example.com").await;

    let token = fx
        .service
        .issue(&user, VerificationPurpose::PasswordReset)
        .await
        .unwrap();
    let updated = fx
        .service
        .consume_for_password_reset(&token, "N3w-Passw0rd!")
        .await
        .unwrap();

    assert_eq!(updated.password_hash, "hashed:N3w-Passw0rd!");
    assert!(updated.verification_token.is_none());
}

#[tokio::test]
async fn test_password_reset_revokes_refresh_tokens() {
    let fx = fixture();
    let user = seeded_user(&fx, "alice@example.com").await;

    // User holds a live refresh token from an earlier login
    let claims = RefreshClaims(Claims::new(
        "alice@example.com",
        TokenKind::Refresh,
        Utc::now(),
        Duration::days(7),
        "sigil",
    ));
    fx.store.replace(user.id, &claims, "session").await.unwrap();
    assert_eq!(fx.tokens.len().await, 1);

    let token = fx
        .service
        .issue(&user, VerificationPurpose::PasswordReset)
        .await
        .unwrap();
    fx.service
        .consume_for_password_reset(&token, "N3w-Passw0rd!")
        .await
        .unwrap();

    // The old session cannot refresh anymore
    assert!(fx.tokens.is_empty().await);
    assert!(!fx
        .store
        .is_live_and_matching(user.id, "session", Utc::now())
        .await
        .unwrap());
}

#[tokio::test]
async fn test_reset_token_single_use_keeps_password() {
    let fx = fixture();
    let user = seeded_user(&fx, "alice@example.com").await;

    let token = fx
        .service
        .issue(&user, VerificationPurpose::PasswordReset)
        .await
        .unwrap();
    fx.service
        .consume_for_password_reset(&token, "F1rst-Pass!")
        .await
        .unwrap();

    let err = fx
        .service
        .consume_for_password_reset(&token, "Sec0nd-Pass!")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Verification(VerificationError::NotFound)
    ));

    // Second attempt changed nothing
    let stored = fx.users.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(stored.password_hash, "hashed:F1rst-Pass!");
}
