//! Test doubles for the mailer and password hasher.
//!
//! Public for the same reason as the repository mocks: integration tests
//! and downstream crates wire full services without real transports.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::errors::{AuthError, DomainResult};

use super::traits::{Mailer, PasswordHasher};
use super::types::VerificationPurpose;

/// A mail captured by [`MockMailer`]
#[derive(Debug, Clone)]
pub struct SentMail {
    pub to: String,
    pub token: String,
    pub purpose: VerificationPurpose,
}

/// Mailer that records every send instead of delivering anything
pub struct MockMailer {
    sent: Mutex<Vec<SentMail>>,
    fail: AtomicBool,
}

impl MockMailer {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: AtomicBool::new(false),
        }
    }

    /// Make every subsequent send fail, simulating a transport outage
    pub fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    /// The most recently captured mail, if any
    pub fn last_sent(&self) -> Option<SentMail> {
        self.sent.lock().unwrap().last().cloned()
    }

    fn record(&self, to: &str, token: &str, purpose: VerificationPurpose) -> Result<String, String> {
        if self.fail.load(Ordering::SeqCst) {
            return Err("mail transport down".to_string());
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push(SentMail {
            to: to.to_string(),
            token: token.to_string(),
            purpose,
        });
        Ok(format!("mock-message-{}", sent.len()))
    }
}

impl Default for MockMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Mailer for MockMailer {
    async fn send_confirmation_email(&self, to: &str, token: &str) -> Result<String, String> {
        self.record(to, token, VerificationPurpose::EmailConfirmation)
    }

    async fn send_password_reset_email(&self, to: &str, token: &str) -> Result<String, String> {
        self.record(to, token, VerificationPurpose::PasswordReset)
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}

/// Transparent password hasher for tests; hashes are `hashed:<password>`
pub struct MockPasswordHasher;

impl PasswordHasher for MockPasswordHasher {
    fn hash(&self, password: &str) -> DomainResult<String> {
        if password.is_empty() {
            return Err(AuthError::HashingFailed {
                reason: "empty password".to_string(),
            }
            .into());
        }
        Ok(format!("hashed:{}", password))
    }

    fn verify(&self, password: &str, hash: &str) -> DomainResult<bool> {
        Ok(hash == format!("hashed:{}", password))
    }
}
