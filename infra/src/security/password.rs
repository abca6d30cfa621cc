//! Bcrypt implementation of the PasswordHasher trait.
//!
//! Bcrypt embeds a per-hash salt, so two hashes of the same password never
//! match each other; verification goes through `bcrypt::verify` only.

use bcrypt::DEFAULT_COST;

use sigil_core::errors::{AuthError, DomainResult};
use sigil_core::services::PasswordHasher;

/// Password hasher backed by the bcrypt crate
pub struct BcryptPasswordHasher {
    /// Bcrypt work factor; higher doubles the cost per increment
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Create a hasher with an explicit work factor
    ///
    /// # Arguments
    /// * `cost` - Bcrypt cost parameter (4 to 31)
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Create a hasher with the crate's default work factor
    pub fn with_default_cost() -> Self {
        Self::new(DEFAULT_COST)
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::with_default_cost()
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, password: &str) -> DomainResult<String> {
        bcrypt::hash(password, self.cost).map_err(|e| {
            AuthError::HashingFailed {
                reason: e.to_string(),
            }
            .into()
        })
    }

    fn verify(&self, password: &str, hash: &str) -> DomainResult<bool> {
        bcrypt::verify(password, hash).map_err(|e| {
            AuthError::HashingFailed {
                reason: e.to_string(),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimum cost keeps these tests fast
    fn hasher() -> BcryptPasswordHasher {
        BcryptPasswordHasher::new(4)
    }

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hasher = hasher();
        let hash = hasher.hash("correct horse battery staple").unwrap();

        assert!(hasher.verify("correct horse battery staple", &hash).unwrap());
        assert!(!hasher.verify("wrong password", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let hasher = hasher();
        let first = hasher.hash("password123").unwrap();
        let second = hasher.hash("password123").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("password123", &first).unwrap());
        assert!(hasher.verify("password123", &second).unwrap());
    }

    #[test]
    fn test_hash_does_not_contain_plaintext() {
        let hasher = hasher();
        let hash = hasher.hash("supersecret").unwrap();

        assert!(!hash.contains("supersecret"));
        assert!(hash.starts_with("$2"));
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        let hasher = hasher();
        let result = hasher.verify("anything", "not-a-bcrypt-hash");

        assert!(result.is_err());
    }
}
