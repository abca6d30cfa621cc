//! Shared wiring for the HTTP integration tests.
//!
//! Builds a full [`AppState`] on top of the in-memory repository mocks,
//! so the tests exercise the real route table and middleware stack
//! without a database or mail transport.

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;

use sigil_api::routes::auth::AppState;
use sigil_core::domain::entities::user::User;
use sigil_core::repositories::{MockRefreshTokenRepository, MockUserRepository};
use sigil_core::services::verification::{MockMailer, MockPasswordHasher};
use sigil_core::services::{
    RefreshTokenStore, SessionIssuer, SignedTokenCodec, TokenConfig, VerificationTokenService,
};
use sigil_shared::config::{SessionConfig, VerificationConfig};

pub type TestState = AppState<MockUserRepository, MockRefreshTokenRepository, MockPasswordHasher>;

/// Everything a test needs: the app state plus handles on the doubles
/// it will want to inspect or poke afterwards.
pub struct TestHarness {
    pub state: web::Data<TestState>,
    pub users: Arc<MockUserRepository>,
    pub records: Arc<MockRefreshTokenRepository>,
    pub mailer: Arc<MockMailer>,
}

pub fn harness() -> TestHarness {
    let users = Arc::new(MockUserRepository::new());
    let records = Arc::new(MockRefreshTokenRepository::new());
    let hasher = Arc::new(MockPasswordHasher);
    let mailer = Arc::new(MockMailer::new());

    let codec = Arc::new(SignedTokenCodec::new(TokenConfig::default()));
    let store = RefreshTokenStore::new(Arc::clone(&records), "test-hash-key");
    let sessions = Arc::new(SessionIssuer::new(
        Arc::clone(&users),
        Arc::clone(&codec),
        store.clone(),
    ));
    let verification = Arc::new(VerificationTokenService::new(
        Arc::clone(&users),
        store,
        Arc::clone(&hasher),
        VerificationConfig::default(),
    ));

    let state = web::Data::new(AppState {
        users: Arc::clone(&users),
        hasher,
        codec,
        sessions,
        verification,
        mailer: mailer.clone(),
        session_config: SessionConfig::default(),
    });

    TestHarness {
        state,
        users,
        records,
        mailer,
    }
}

/// Insert a user who has already confirmed their email address.
///
/// The password is stored the way [`MockPasswordHasher`] would hash it,
/// so a subsequent login with `password` succeeds.
pub async fn seed_confirmed_user(harness: &TestHarness, email: &str, password: &str) {
    let mut user = User::new(email.to_string(), format!("hashed:{}", password));
    user.enable();
    harness.users.insert(user).await;
}
