//! Main session lifecycle implementation

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainResult, TokenError};
use crate::repositories::{RefreshTokenRepository, UserRepository};
use crate::services::token::{RefreshTokenStore, SignedTokenCodec};

/// Coordinates the codec and the store into whole-session operations.
///
/// Login mints a pair and records the refresh half; refresh verifies,
/// re-issues, and rotates; logout revokes. Access tokens are checked purely
/// by signature, which is the accepted trade-off of a stateless access
/// layer: revocation only bites once the short access window runs out.
pub struct SessionIssuer<U, R>
where
    U: UserRepository,
    R: RefreshTokenRepository,
{
    users: Arc<U>,
    codec: Arc<SignedTokenCodec>,
    store: RefreshTokenStore<R>,
}

impl<U, R> SessionIssuer<U, R>
where
    U: UserRepository,
    R: RefreshTokenRepository,
{
    /// Create a new session issuer
    ///
    /// # Arguments
    ///
    /// * `users` - User repository for subject resolution
    /// * `codec` - Codec shared with whatever else verifies tokens
    /// * `store` - Refresh token store enforcing single-session
    pub fn new(users: Arc<U>, codec: Arc<SignedTokenCodec>, store: RefreshTokenStore<R>) -> Self {
        Self {
            users,
            codec,
            store,
        }
    }

    /// Starts a session for an already-authenticated user
    ///
    /// The caller has checked the password; this only enforces that the
    /// account is enabled, then issues a pair and makes its refresh half
    /// the user's single live token.
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - Fresh access and refresh tokens
    /// * `Err(AuthError::AccountDisabled)` - Email not confirmed yet
    pub async fn login(&self, user: &User) -> DomainResult<TokenPair> {
        if !user.enabled {
            warn!(user_id = %user.id, "login attempt on disabled account");
            return Err(AuthError::AccountDisabled.into());
        }

        let pair = self.codec.issue_pair(&user.email)?;
        // Decode our own token so the stored record mirrors its exact claims
        let claims = self.codec.verify_refresh(&pair.refresh_token)?;
        self.store
            .replace(user.id, &claims, &pair.refresh_token)
            .await?;

        info!(user_id = %user.id, "session started");
        Ok(pair)
    }

    /// Exchanges a live refresh token for a fresh pair, rotating the old
    /// one out atomically
    ///
    /// Validation runs strictest-first: signature and expiry, then subject
    /// resolution, then the store. A token that fails the store check comes
    /// back [`TokenError::RevokedOrUnknown`] whether it was logged out,
    /// superseded, or never issued; callers cannot tell those apart. An
    /// unknown subject gets the same answer so the endpoint cannot be used
    /// to probe which emails exist.
    ///
    /// Two concurrent calls with the same token race at the rotation step
    /// and exactly one wins.
    ///
    /// # Returns
    ///
    /// * `Ok((User, TokenPair))` - The session owner and their new pair
    /// * `Err(TokenError)` - Expired, malformed, wrong kind, or not live
    pub async fn refresh(&self, raw_refresh: &str) -> DomainResult<(User, TokenPair)> {
        let claims = self.codec.verify_refresh(raw_refresh)?;

        let user = self
            .users
            .find_by_email(claims.subject())
            .await?
            .ok_or(TokenError::RevokedOrUnknown)?;

        let now = Utc::now();
        if !self
            .store
            .is_live_and_matching(user.id, raw_refresh, now)
            .await?
        {
            warn!(user_id = %user.id, "refresh with token that is not live");
            return Err(TokenError::RevokedOrUnknown.into());
        }

        let pair = self.codec.issue_pair(&user.email)?;
        let new_claims = self.codec.verify_refresh(&pair.refresh_token)?;

        let rotated = self
            .store
            .rotate(user.id, raw_refresh, &new_claims, &pair.refresh_token, now)
            .await?;
        if !rotated {
            // Lost the race; someone else already rotated this token away
            warn!(user_id = %user.id, "refresh lost rotation race");
            return Err(TokenError::RevokedOrUnknown.into());
        }

        info!(user_id = %user.id, "session refreshed");
        Ok((user, pair))
    }

    /// Resolves a bearer access token to its user
    ///
    /// Purely signature-based; the store is not consulted.
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - Token valid and subject known
    /// * `Err(TokenError)` - Invalid token or unknown subject
    pub async fn authenticate(&self, raw_access: &str) -> DomainResult<User> {
        let claims = self.codec.verify_access(raw_access)?;

        self.users
            .find_by_email(claims.subject())
            .await?
            .ok_or_else(|| TokenError::RevokedOrUnknown.into())
    }

    /// Ends the user's session by revoking all refresh records
    ///
    /// Safe to repeat; a second logout simply removes nothing. The user's
    /// current access token keeps verifying until its window ends.
    ///
    /// # Returns
    ///
    /// * `Ok(count)` - Number of refresh records removed
    pub async fn logout(&self, user: &User) -> DomainResult<u64> {
        let removed = self.store.revoke_all(user.id).await?;
        info!(user_id = %user.id, removed, "session ended");
        Ok(removed)
    }
}
