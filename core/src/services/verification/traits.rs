//! Traits for mail delivery and password hashing integration

use async_trait::async_trait;

use crate::errors::DomainResult;

/// Trait for outbound mail delivery
///
/// Implementations receive the raw verification token and build their own
/// links from it; the core never learns frontend URLs. The `Ok` value is
/// the provider's message id.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send the account confirmation mail for a fresh registration
    async fn send_confirmation_email(&self, to: &str, token: &str) -> Result<String, String>;

    /// Send the password reset mail
    async fn send_password_reset_email(&self, to: &str, token: &str) -> Result<String, String>;

    /// Name of the delivery backend, for logs and diagnostics
    fn provider_name(&self) -> &str;
}

/// Trait for password hashing
///
/// Hashing is CPU-bound and synchronous; callers on async paths accept the
/// blocking cost, which stays in the low milliseconds at sane work factors.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password for storage
    fn hash(&self, password: &str) -> DomainResult<String>;

    /// Check a plaintext password against a stored hash
    fn verify(&self, password: &str, hash: &str) -> DomainResult<bool>;
}
