//! User entity representing a registered account in the Sigil system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role attached to an account.
///
/// Sigil only carries the role along; authorization decisions belong to
/// the services consuming the tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Regular account, assigned at registration
    User,
    /// Administrative account
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Admin => "admin",
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(UserRole::User),
            "admin" => Ok(UserRole::Admin),
            _ => Err(format!("Invalid user role: {}", s)),
        }
    }
}

/// User entity representing a registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Email address, the account's identity key
    pub email: String,

    /// Hashed password, never the plaintext
    pub password_hash: String,

    /// Whether the account may log in; false until the email is confirmed
    pub enabled: bool,

    /// Role attached to the account
    pub role: UserRole,

    /// Live verification token, if one has been issued and not yet consumed
    pub verification_token: Option<String>,

    /// Expiry of the live verification token
    pub verification_token_expiry: Option<DateTime<Utc>>,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new disabled account awaiting email confirmation
    pub fn new(email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            enabled: false,
            role: UserRole::User,
            verification_token: None,
            verification_token_expiry: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Enables the account after its email has been confirmed
    pub fn enable(&mut self) {
        self.enabled = true;
        self.updated_at = Utc::now();
    }

    /// Installs a verification token, overwriting any previous one.
    ///
    /// Only one verification token is live per user at a time; a second
    /// issuance invalidates the first regardless of its purpose.
    pub fn set_verification_token(&mut self, token: String, expiry: DateTime<Utc>) {
        self.verification_token = Some(token);
        self.verification_token_expiry = Some(expiry);
        self.updated_at = Utc::now();
    }

    /// Clears the verification token slot after consumption
    pub fn clear_verification_token(&mut self) {
        self.verification_token = None;
        self.verification_token_expiry = None;
        self.updated_at = Utc::now();
    }

    /// Replaces the stored password hash
    pub fn set_password_hash(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }

    /// Checks whether the stored verification token is expired at `now`.
    ///
    /// Returns true when no token is present at all.
    pub fn verification_token_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.verification_token_expiry {
            Some(expiry) => now > expiry,
            None => true,
        }
    }
}
