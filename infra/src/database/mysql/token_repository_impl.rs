//! MySQL implementation of the RefreshTokenRepository trait.
//!
//! Concrete refresh token record persistence using MySQL with SQLx. Only
//! keyed hashes reach this layer; the compound operations run inside
//! transactions so concurrent rotations of the same token resolve to a
//! single winner.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use sigil_core::domain::entities::token::RefreshTokenRecord;
use sigil_core::errors::DomainError;
use sigil_core::repositories::RefreshTokenRepository;

/// MySQL implementation of RefreshTokenRepository
pub struct MySqlRefreshTokenRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlRefreshTokenRepository {
    /// Create a new MySQL refresh token repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to RefreshTokenRecord entity
    fn row_to_record(row: &sqlx::mysql::MySqlRow) -> Result<RefreshTokenRecord, DomainError> {
        let id: String = row.try_get("id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get id: {}", e),
        })?;

        let user_id: String = row.try_get("user_id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get user_id: {}", e),
        })?;

        Ok(RefreshTokenRecord {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid record UUID: {}", e),
            })?,
            user_id: Uuid::parse_str(&user_id).map_err(|e| DomainError::Internal {
                message: format!("Invalid user UUID: {}", e),
            })?,
            token_hash: row
                .try_get("token_hash")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get token_hash: {}", e),
                })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get created_at: {}", e),
                })?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get expires_at: {}", e),
                })?,
        })
    }
}

#[async_trait]
impl RefreshTokenRepository for MySqlRefreshTokenRepository {
    async fn find_by_user_and_hash(
        &self,
        user_id: Uuid,
        token_hash: &str,
    ) -> Result<Option<RefreshTokenRecord>, DomainError> {
        let query = r#"
            SELECT id, user_id, token_hash, created_at, expires_at
            FROM refresh_tokens
            WHERE user_id = ? AND token_hash = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(user_id.to_string())
            .bind(token_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find refresh token record: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_record(&row)?)),
            None => Ok(None),
        }
    }

    async fn replace_for_user(
        &self,
        user_id: Uuid,
        record: RefreshTokenRecord,
    ) -> Result<RefreshTokenRecord, DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| DomainError::Internal {
            message: format!("Failed to begin transaction: {}", e),
        })?;

        sqlx::query("DELETE FROM refresh_tokens WHERE user_id = ?")
            .bind(user_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to clear user records: {}", e),
            })?;

        let insert = r#"
            INSERT INTO refresh_tokens (
                id, user_id, token_hash, created_at, expires_at
            ) VALUES (?, ?, ?, ?, ?)
        "#;

        sqlx::query(insert)
            .bind(record.id.to_string())
            .bind(record.user_id.to_string())
            .bind(&record.token_hash)
            .bind(record.created_at)
            .bind(record.expires_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to insert refresh token record: {}", e),
            })?;

        tx.commit().await.map_err(|e| DomainError::Internal {
            message: format!("Failed to commit replacement: {}", e),
        })?;

        Ok(record)
    }

    async fn rotate(
        &self,
        user_id: Uuid,
        old_hash: &str,
        now: DateTime<Utc>,
        replacement: RefreshTokenRecord,
    ) -> Result<bool, DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| DomainError::Internal {
            message: format!("Failed to begin transaction: {}", e),
        })?;

        // Two racing rotations serialize on this row; only the first
        // delete finds anything to remove.
        let retired = sqlx::query(
            r#"
            DELETE FROM refresh_tokens
            WHERE user_id = ? AND token_hash = ? AND expires_at > ?
        "#,
        )
        .bind(user_id.to_string())
        .bind(old_hash)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::Internal {
            message: format!("Failed to retire old record: {}", e),
        })?;

        if retired.rows_affected() == 0 {
            tx.rollback().await.map_err(|e| DomainError::Internal {
                message: format!("Failed to roll back rotation: {}", e),
            })?;
            return Ok(false);
        }

        sqlx::query("DELETE FROM refresh_tokens WHERE user_id = ?")
            .bind(user_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to clear user records: {}", e),
            })?;

        let insert = r#"
            INSERT INTO refresh_tokens (
                id, user_id, token_hash, created_at, expires_at
            ) VALUES (?, ?, ?, ?, ?)
        "#;

        sqlx::query(insert)
            .bind(replacement.id.to_string())
            .bind(replacement.user_id.to_string())
            .bind(&replacement.token_hash)
            .bind(replacement.created_at)
            .bind(replacement.expires_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to insert replacement record: {}", e),
            })?;

        tx.commit().await.map_err(|e| DomainError::Internal {
            message: format!("Failed to commit rotation: {}", e),
        })?;

        Ok(true)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, DomainError> {
        let query = "DELETE FROM refresh_tokens WHERE id = ?";

        let result = sqlx::query(query)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to delete record: {}", e),
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_all_for_user(&self, user_id: Uuid) -> Result<u64, DomainError> {
        let query = "DELETE FROM refresh_tokens WHERE user_id = ?";

        let result = sqlx::query(query)
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to delete user records: {}", e),
            })?;

        Ok(result.rows_affected())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        // A record is live strictly before its expiry, so the sweep takes
        // everything at or past it.
        let query = "DELETE FROM refresh_tokens WHERE expires_at <= ?";

        let result = sqlx::query(query)
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to delete expired records: {}", e),
            })?;

        Ok(result.rows_affected())
    }
}
