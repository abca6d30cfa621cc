//! User repository trait defining the interface for user persistence.
//!
//! The trait is async-first and keeps the abstraction boundary between the
//! domain and the database layer. Implementations live in the infra crate.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// # Security Considerations
/// - Lookups by email must be exact-match; callers normalize case
/// - Verification tokens are opaque values stored directly on the user row
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their email address
    ///
    /// # Arguments
    /// * `email` - The email address to search for (already normalized)
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with that email
    /// * `Err(DomainError)` - Database error occurred
    ///
    /// # Example
    /// ```no_run
    /// # use sigil_core::repositories::UserRepository;
    /// # async fn example(repo: &impl UserRepository) -> Result<(), Box<dyn std::error::Error>> {
    /// match repo.find_by_email("user@example.com").await? {
    ///     Some(user) => println!("user id: {}", user.id),
    ///     None => println!("not registered"),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by their unique identifier
    ///
    /// # Arguments
    /// * `id` - The UUID of the user
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with that ID
    /// * `Err(DomainError)` - Database error occurred
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find the user currently holding the given verification token
    ///
    /// Expiry is not checked here; the verification service decides what an
    /// expired hit means.
    ///
    /// # Arguments
    /// * `token` - The opaque verification token value
    ///
    /// # Returns
    /// * `Ok(Some(User))` - A user holds this token
    /// * `Ok(None)` - No user holds this token
    /// * `Err(DomainError)` - Database error occurred
    async fn find_by_verification_token(&self, token: &str) -> Result<Option<User>, DomainError>;

    /// Check whether a user exists with the given email
    ///
    /// # Arguments
    /// * `email` - The email address to check
    ///
    /// # Returns
    /// * `Ok(true)` - Email already registered
    /// * `Ok(false)` - Email free
    /// * `Err(DomainError)` - Database error occurred
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;

    /// Create a new user
    ///
    /// # Arguments
    /// * `user` - The User entity to persist
    ///
    /// # Returns
    /// * `Ok(User)` - The created user
    /// * `Err(DomainError)` - Creation failed (e.g. duplicate email)
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Update an existing user
    ///
    /// Persists every mutable column, including the verification token slot
    /// and the enabled flag.
    ///
    /// # Arguments
    /// * `user` - The User entity with updated fields
    ///
    /// # Returns
    /// * `Ok(User)` - The updated user
    /// * `Err(DomainError)` - Update failed (e.g. user not found)
    async fn update(&self, user: User) -> Result<User, DomainError>;

    /// Delete a user
    ///
    /// Used to roll registration back when the confirmation mail cannot be
    /// delivered.
    ///
    /// # Arguments
    /// * `id` - The UUID of the user to delete
    ///
    /// # Returns
    /// * `Ok(true)` - User was deleted
    /// * `Ok(false)` - User not found
    /// * `Err(DomainError)` - Deletion failed
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
