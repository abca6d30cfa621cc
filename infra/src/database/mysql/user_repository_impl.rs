//! MySQL implementation of the UserRepository trait.
//!
//! Concrete user persistence using MySQL with SQLx. UUIDs are stored as
//! CHAR(36) strings and the role as a lowercase string column.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use sigil_core::domain::entities::user::{User, UserRole};
use sigil_core::errors::{AuthError, DomainError};
use sigil_core::repositories::UserRepository;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row.try_get("id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get id: {}", e),
        })?;

        let role: String = row.try_get("role").map_err(|e| DomainError::Internal {
            message: format!("Failed to get role: {}", e),
        })?;

        Ok(User {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid user UUID: {}", e),
            })?,
            email: row.try_get("email").map_err(|e| DomainError::Internal {
                message: format!("Failed to get email: {}", e),
            })?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get password_hash: {}", e),
                })?,
            enabled: row.try_get("enabled").map_err(|e| DomainError::Internal {
                message: format!("Failed to get enabled: {}", e),
            })?,
            role: role.parse::<UserRole>().map_err(|e| DomainError::Internal {
                message: format!("Failed to parse role: {}", e),
            })?,
            verification_token: row
                .try_get("verification_token")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get verification_token: {}", e),
                })?,
            verification_token_expiry: row
                .try_get::<Option<DateTime<Utc>>, _>("verification_token_expiry")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get verification_token_expiry: {}", e),
                })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get created_at: {}", e),
                })?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get updated_at: {}", e),
                })?,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, email, password_hash, enabled, role,
                   verification_token, verification_token_expiry,
                   created_at, updated_at
            FROM users
            WHERE email = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find user by email: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, email, password_hash, enabled, role,
                   verification_token, verification_token_expiry,
                   created_at, updated_at
            FROM users
            WHERE id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find user by id: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_verification_token(&self, token: &str) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, email, password_hash, enabled, role,
                   verification_token, verification_token_expiry,
                   created_at, updated_at
            FROM users
            WHERE verification_token = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find user by verification token: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let query = r#"
            SELECT EXISTS(
                SELECT 1 FROM users
                WHERE email = ?
            ) as user_exists
        "#;

        let result = sqlx::query(query)
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to check user existence: {}", e),
            })?;

        let exists: i8 = result
            .try_get("user_exists")
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to get existence result: {}", e),
            })?;

        Ok(exists == 1)
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        // Check for duplicate email first
        if self.exists_by_email(&user.email).await? {
            return Err(AuthError::UserAlreadyExists.into());
        }

        let query = r#"
            INSERT INTO users (
                id, email, password_hash, enabled, role,
                verification_token, verification_token_expiry,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.enabled)
            .bind(user.role.as_str())
            .bind(&user.verification_token)
            .bind(user.verification_token_expiry)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to create user: {}", e),
            })?;

        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            UPDATE users SET
                email = ?,
                password_hash = ?,
                enabled = ?,
                role = ?,
                verification_token = ?,
                verification_token_expiry = ?,
                updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.enabled)
            .bind(user.role.as_str())
            .bind(&user.verification_token)
            .bind(user.verification_token_expiry)
            .bind(user.updated_at)
            .bind(user.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to update user: {}", e),
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("User"));
        }

        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let query = "DELETE FROM users WHERE id = ?";

        let result = sqlx::query(query)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to delete user: {}", e),
            })?;

        Ok(result.rows_affected() > 0)
    }
}
