//! Server-side ledger of outstanding refresh tokens

use std::sync::Arc;

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use tracing::debug;
use uuid::Uuid;

use crate::domain::entities::token::{RefreshClaims, RefreshTokenRecord};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::RefreshTokenRepository;

/// Store tracking which refresh token each user currently holds.
///
/// Tokens are recorded as keyed SHA-256 hashes; the raw token never crosses
/// into the repository. Revocation is deletion, so a token that is missing,
/// revoked, or superseded all look the same to a caller: not live.
///
/// The single-session policy lives here: every insert path first clears the
/// user's existing records, so at most one refresh token per user is valid
/// at any time.
pub struct RefreshTokenStore<R: RefreshTokenRepository> {
    repository: Arc<R>,
    hash_key: String,
}

impl<R: RefreshTokenRepository> Clone for RefreshTokenStore<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            hash_key: self.hash_key.clone(),
        }
    }
}

impl<R: RefreshTokenRepository> RefreshTokenStore<R> {
    /// Creates a store hashing with the given key
    ///
    /// # Arguments
    ///
    /// * `repository` - Persistence for token records
    /// * `hash_key` - Secret mixed into every hash so leaked rows cannot be
    ///   matched against candidate tokens offline
    pub fn new(repository: Arc<R>, hash_key: impl Into<String>) -> Self {
        Self {
            repository,
            hash_key: hash_key.into(),
        }
    }

    /// Keyed one-way hash of a raw refresh token
    pub fn hash_token(&self, raw: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.hash_key.as_bytes());
        hasher.update(raw.as_bytes());
        hex::encode(hasher.finalize())
    }

    fn record_for(
        &self,
        user_id: Uuid,
        claims: &RefreshClaims,
        raw: &str,
    ) -> DomainResult<RefreshTokenRecord> {
        RefreshTokenRecord::from_claims(user_id, self.hash_token(raw), claims).ok_or_else(|| {
            DomainError::internal("refresh claims carry out-of-range timestamps")
        })
    }

    /// Records a freshly issued refresh token, dropping all prior ones
    ///
    /// Used at login. Delete-all plus insert runs atomically in the
    /// repository, so a user never transiently holds two live tokens.
    ///
    /// # Arguments
    ///
    /// * `user_id` - Owner of the token
    /// * `claims` - The new token's verified or just-issued claims
    /// * `raw` - The raw token; hashed here, never stored
    pub async fn replace(
        &self,
        user_id: Uuid,
        claims: &RefreshClaims,
        raw: &str,
    ) -> DomainResult<RefreshTokenRecord> {
        let record = self.record_for(user_id, claims, raw)?;
        self.repository.replace_for_user(user_id, record).await
    }

    /// Checks whether `raw` is the user's current live refresh token
    ///
    /// A hit on an expired record deletes that record on the spot, so the
    /// background sweep is a safety net rather than a correctness
    /// requirement.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - A live record matches the presented token
    /// * `Ok(false)` - No record, or an expired one (now removed)
    pub async fn is_live_and_matching(
        &self,
        user_id: Uuid,
        raw: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<bool> {
        let hash = self.hash_token(raw);
        match self.repository.find_by_user_and_hash(user_id, &hash).await? {
            Some(record) if record.is_live(now) => Ok(true),
            Some(record) => {
                debug!(user_id = %user_id, "dropping expired refresh token record");
                self.repository.delete_by_id(record.id).await?;
                Ok(false)
            }
            None => Ok(false),
        }
    }

    /// Atomically retires `old_raw` and installs the replacement token
    ///
    /// The swap only happens if the old token's record is still live at
    /// `now`. When two requests race with the same old token, the
    /// repository guarantees exactly one of them gets `Ok(true)`; the other
    /// sees `Ok(false)` and must treat the token as revoked.
    pub async fn rotate(
        &self,
        user_id: Uuid,
        old_raw: &str,
        replacement_claims: &RefreshClaims,
        replacement_raw: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<bool> {
        let old_hash = self.hash_token(old_raw);
        let replacement = self.record_for(user_id, replacement_claims, replacement_raw)?;
        self.repository
            .rotate(user_id, &old_hash, now, replacement)
            .await
    }

    /// Deletes every record the user holds; logout and password reset
    ///
    /// Succeeds even when there is nothing to delete.
    pub async fn revoke_all(&self, user_id: Uuid) -> DomainResult<u64> {
        let removed = self.repository.delete_all_for_user(user_id).await?;
        debug!(user_id = %user_id, removed, "revoked refresh tokens");
        Ok(removed)
    }

    /// Sweeps out records that expired at or before `now`
    pub async fn delete_expired(&self, now: DateTime<Utc>) -> DomainResult<u64> {
        self.repository.delete_expired(now).await
    }
}
