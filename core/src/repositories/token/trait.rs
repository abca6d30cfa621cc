//! Refresh token repository trait defining the interface for token persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::token::RefreshTokenRecord;
use crate::errors::DomainError;

/// Repository trait for refresh token record persistence
///
/// Only keyed hashes ever reach this layer; raw refresh tokens stay in the
/// service above it. Revocation is deletion: a record that is absent is
/// indistinguishable from one that never existed.
///
/// # Concurrency
/// [`rotate`](RefreshTokenRepository::rotate) is the one compound operation.
/// Implementations must make its check-then-replace sequence atomic so that
/// two concurrent calls presenting the same `old_hash` cannot both succeed.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    /// Find the record for a user that matches the given token hash
    ///
    /// Liveness is not checked here; callers compare `expires_at` themselves.
    ///
    /// # Arguments
    /// * `user_id` - The UUID of the token owner
    /// * `token_hash` - Keyed hash of the presented refresh token
    ///
    /// # Returns
    /// * `Ok(Some(RefreshTokenRecord))` - Matching record found
    /// * `Ok(None)` - No record for this user and hash
    /// * `Err(DomainError)` - Database error occurred
    async fn find_by_user_and_hash(
        &self,
        user_id: Uuid,
        token_hash: &str,
    ) -> Result<Option<RefreshTokenRecord>, DomainError>;

    /// Replace every record the user holds with a single new one
    ///
    /// Delete-all plus insert must execute atomically; no interleaved reader
    /// may observe the old and new records side by side.
    ///
    /// # Arguments
    /// * `user_id` - The UUID of the token owner
    /// * `record` - The record to insert after clearing existing ones
    ///
    /// # Returns
    /// * `Ok(RefreshTokenRecord)` - The inserted record
    /// * `Err(DomainError)` - Replacement failed
    async fn replace_for_user(
        &self,
        user_id: Uuid,
        record: RefreshTokenRecord,
    ) -> Result<RefreshTokenRecord, DomainError>;

    /// Atomically swap a live old record for a replacement
    ///
    /// Deletes the record matching (`user_id`, `old_hash`) only if it is
    /// still live at `now`. When that conditional delete removes a row, all
    /// remaining records for the user are cleared and `replacement` is
    /// inserted, all in one transaction. When it removes nothing the store
    /// is left untouched.
    ///
    /// Under two racing calls with the same `old_hash` exactly one returns
    /// `Ok(true)`; the loser sees the row already gone.
    ///
    /// # Arguments
    /// * `user_id` - The UUID of the token owner
    /// * `old_hash` - Keyed hash of the token being rotated away
    /// * `now` - Instant used for the liveness condition
    /// * `replacement` - The record to install
    ///
    /// # Returns
    /// * `Ok(true)` - Old record was live and has been swapped
    /// * `Ok(false)` - No live record matched; nothing changed
    /// * `Err(DomainError)` - Database error occurred
    async fn rotate(
        &self,
        user_id: Uuid,
        old_hash: &str,
        now: DateTime<Utc>,
        replacement: RefreshTokenRecord,
    ) -> Result<bool, DomainError>;

    /// Delete a single record by its identifier
    ///
    /// Used for lazy cleanup when a lookup surfaces an expired record.
    ///
    /// # Arguments
    /// * `id` - The UUID of the record to delete
    ///
    /// # Returns
    /// * `Ok(true)` - Record was deleted
    /// * `Ok(false)` - Record not found
    /// * `Err(DomainError)` - Deletion failed
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Delete every record the user holds
    ///
    /// # Arguments
    /// * `user_id` - The UUID of the user
    ///
    /// # Returns
    /// * `Ok(count)` - Number of records deleted (zero is fine)
    /// * `Err(DomainError)` - Deletion failed
    async fn delete_all_for_user(&self, user_id: Uuid) -> Result<u64, DomainError>;

    /// Delete every record whose expiry is at or before `now`
    ///
    /// Run periodically as a background sweep.
    ///
    /// # Arguments
    /// * `now` - Cutoff instant
    ///
    /// # Returns
    /// * `Ok(count)` - Number of expired records removed
    /// * `Err(DomainError)` - Deletion failed
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError>;
}
