//! Main verification token service implementation

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use sigil_shared::config::VerificationConfig;

use crate::domain::entities::user::User;
use crate::errors::{DomainResult, VerificationError};
use crate::repositories::{RefreshTokenRepository, UserRepository};
use crate::services::token::RefreshTokenStore;

use super::traits::PasswordHasher;
use super::types::VerificationPurpose;

/// Service managing single-use verification tokens.
///
/// Tokens are opaque UUIDs stored in the user's single verification slot;
/// issuing a new one silently invalidates whatever the slot held before.
/// Consumption clears the slot, so a link works exactly once.
///
/// An unknown token and an expired one produce the same
/// [`VerificationError::NotFound`], which keeps responses from confirming
/// that a given token ever existed.
pub struct VerificationTokenService<U, R, H>
where
    U: UserRepository,
    R: RefreshTokenRepository,
    H: PasswordHasher,
{
    users: Arc<U>,
    store: RefreshTokenStore<R>,
    hasher: Arc<H>,
    config: VerificationConfig,
}

impl<U, R, H> VerificationTokenService<U, R, H>
where
    U: UserRepository,
    R: RefreshTokenRepository,
    H: PasswordHasher,
{
    /// Create a new verification token service
    ///
    /// # Arguments
    ///
    /// * `users` - User repository holding the verification slot
    /// * `store` - Refresh token store, drained on password reset
    /// * `hasher` - Password hasher for reset flows
    /// * `config` - Expiry windows per purpose
    pub fn new(
        users: Arc<U>,
        store: RefreshTokenStore<R>,
        hasher: Arc<H>,
        config: VerificationConfig,
    ) -> Self {
        Self {
            users,
            store,
            hasher,
            config,
        }
    }

    fn window(&self, purpose: VerificationPurpose) -> Duration {
        match purpose {
            VerificationPurpose::EmailConfirmation => {
                Duration::hours(self.config.email_confirmation_expiry_hours)
            }
            VerificationPurpose::PasswordReset => {
                Duration::minutes(self.config.password_reset_expiry_minutes)
            }
        }
    }

    /// Issues a fresh verification token for the user and persists it
    ///
    /// Overwrites any token already in the slot. Returns the raw token for
    /// the caller to deliver; only the caller ever sees it.
    ///
    /// # Arguments
    ///
    /// * `user` - The user receiving the token
    /// * `purpose` - Picks the expiry window
    pub async fn issue(&self, user: &User, purpose: VerificationPurpose) -> DomainResult<String> {
        let token = Uuid::new_v4().to_string();
        let expiry = Utc::now() + self.window(purpose);

        let mut user = user.clone();
        user.set_verification_token(token.clone(), expiry);
        self.users.update(user).await?;

        info!(purpose = %purpose, "issued verification token");
        Ok(token)
    }

    /// Consumes a confirmation token: enables the account, clears the slot
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - The now-enabled user
    /// * `Err(VerificationError::NotFound)` - Token unknown or expired
    pub async fn consume_for_email_verification(&self, token: &str) -> DomainResult<User> {
        let mut user = self.resolve_live_token(token).await?;

        user.enable();
        user.clear_verification_token();
        let user = self.users.update(user).await?;

        info!(user_id = %user.id, "email verified, account enabled");
        Ok(user)
    }

    /// Consumes a reset token: installs the new password, clears the slot,
    /// and revokes every outstanding refresh token
    ///
    /// Old sessions die here; stolen refresh tokens stop working the moment
    /// the owner resets their password.
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - The user with the new password hash
    /// * `Err(VerificationError::NotFound)` - Token unknown or expired
    pub async fn consume_for_password_reset(
        &self,
        token: &str,
        new_password: &str,
    ) -> DomainResult<User> {
        let mut user = self.resolve_live_token(token).await?;

        let password_hash = self.hasher.hash(new_password)?;
        user.set_password_hash(password_hash);
        user.clear_verification_token();
        let user = self.users.update(user).await?;

        let revoked = self.store.revoke_all(user.id).await?;
        info!(user_id = %user.id, revoked, "password reset, sessions revoked");
        Ok(user)
    }

    /// Finds the token holder and checks expiry; miss and expired collapse
    /// into the same error.
    async fn resolve_live_token(&self, token: &str) -> DomainResult<User> {
        let user = self
            .users
            .find_by_verification_token(token)
            .await?
            .ok_or(VerificationError::NotFound)?;

        if user.verification_token_expired_at(Utc::now()) {
            debug!(user_id = %user.id, "verification token past its window");
            return Err(VerificationError::NotFound.into());
        }

        Ok(user)
    }
}
