//! In-memory implementation of RefreshTokenRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::token::RefreshTokenRecord;
use crate::errors::DomainError;

use super::r#trait::RefreshTokenRepository;

/// Mock refresh token repository backed by a shared Vec
///
/// Compound operations hold the write lock for their whole critical section,
/// which gives the same winner-takes-all rotation behavior the MySQL
/// implementation gets from its transaction.
pub struct MockRefreshTokenRepository {
    records: Arc<RwLock<Vec<RefreshTokenRecord>>>,
}

impl MockRefreshTokenRepository {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Number of records currently stored, across all users
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Seed a record directly, bypassing replace semantics
    pub async fn insert(&self, record: RefreshTokenRecord) {
        self.records.write().await.push(record);
    }
}

impl Default for MockRefreshTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RefreshTokenRepository for MockRefreshTokenRepository {
    async fn find_by_user_and_hash(
        &self,
        user_id: Uuid,
        token_hash: &str,
    ) -> Result<Option<RefreshTokenRecord>, DomainError> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .find(|r| r.user_id == user_id && r.token_hash == token_hash)
            .cloned())
    }

    async fn replace_for_user(
        &self,
        user_id: Uuid,
        record: RefreshTokenRecord,
    ) -> Result<RefreshTokenRecord, DomainError> {
        let mut records = self.records.write().await;
        records.retain(|r| r.user_id != user_id);
        records.push(record.clone());
        Ok(record)
    }

    async fn rotate(
        &self,
        user_id: Uuid,
        old_hash: &str,
        now: DateTime<Utc>,
        replacement: RefreshTokenRecord,
    ) -> Result<bool, DomainError> {
        // One write lock across the whole check-then-replace sequence
        let mut records = self.records.write().await;

        let matched = records
            .iter()
            .any(|r| r.user_id == user_id && r.token_hash == old_hash && r.is_live(now));
        if !matched {
            return Ok(false);
        }

        records.retain(|r| r.user_id != user_id);
        records.push(replacement);
        Ok(true)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.id != id);
        Ok(records.len() < before)
    }

    async fn delete_all_for_user(&self, user_id: Uuid) -> Result<u64, DomainError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.user_id != user_id);
        Ok((before - records.len()) as u64)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.is_live(now));
        Ok((before - records.len()) as u64)
    }
}
