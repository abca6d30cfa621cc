//! Token entities for signed-token authentication.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Discriminator carried inside every signed token.
///
/// The two kinds have different expiry windows and must never be accepted
/// in each other's place: an access token authorizes API calls, a refresh
/// token is only ever exchanged for a new pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Access => write!(f, "access"),
            TokenKind::Refresh => write!(f, "refresh"),
        }
    }
}

/// Claims structure for the signed-token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user email)
    pub sub: String,

    /// Issued at timestamp (seconds since epoch)
    pub iat: i64,

    /// Expiration timestamp (seconds since epoch)
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// Unique token id. Timestamps have second resolution, so without it
    /// two tokens issued in the same second would be byte-identical and
    /// rotation could hand back the token it was meant to retire.
    pub jti: String,

    /// Token kind discriminator
    pub kind: TokenKind,
}

impl Claims {
    /// Creates new claims for a token of the given kind
    ///
    /// # Arguments
    ///
    /// * `subject` - The user's email address
    /// * `kind` - Access or refresh
    /// * `issued_at` - Issuance instant; the expiry is `issued_at + window`
    /// * `window` - Validity window for this kind
    /// * `issuer` - Issuer claim value
    pub fn new(
        subject: impl Into<String>,
        kind: TokenKind,
        issued_at: DateTime<Utc>,
        window: chrono::Duration,
        issuer: impl Into<String>,
    ) -> Self {
        let expiry = issued_at + window;
        Self {
            sub: subject.into(),
            iat: issued_at.timestamp(),
            exp: expiry.timestamp(),
            iss: issuer.into(),
            jti: Uuid::new_v4().to_string(),
            kind,
        }
    }

    /// Issuance instant as a `DateTime`
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.iat, 0)
    }

    /// Expiry instant as a `DateTime`
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// Width of the validity window in seconds
    pub fn window_seconds(&self) -> i64 {
        self.exp - self.iat
    }

    /// Checks whether the claims are expired at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}

/// Claims proven to come from an access token.
///
/// Produced only by the codec's kind-checked verification, so holding one
/// means the signature, expiry, and `access` discriminator all checked out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessClaims(pub Claims);

impl AccessClaims {
    /// The verified subject (user email)
    pub fn subject(&self) -> &str {
        &self.0.sub
    }
}

/// Claims proven to come from a refresh token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshClaims(pub Claims);

impl RefreshClaims {
    /// The verified subject (user email)
    pub fn subject(&self) -> &str {
        &self.0.sub
    }
}

/// Refresh-token record persisted by the store.
///
/// Holds the keyed hash of the raw token, never the token itself. The
/// timestamps mirror the signed token's own `iat`/`exp` claims so the
/// stored lifetime and the signature lifetime cannot drift apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshTokenRecord {
    /// Unique identifier for the record
    pub id: Uuid,

    /// User this token belongs to
    pub user_id: Uuid,

    /// Keyed hash of the raw refresh token
    pub token_hash: String,

    /// Timestamp when the token was issued
    pub created_at: DateTime<Utc>,

    /// Timestamp when the token expires
    pub expires_at: DateTime<Utc>,
}

impl RefreshTokenRecord {
    /// Creates a record from verified refresh claims
    ///
    /// # Arguments
    ///
    /// * `user_id` - Owner of the token
    /// * `token_hash` - Keyed hash of the raw token
    /// * `claims` - The refresh token's own claims; `iat`/`exp` become the
    ///   record timestamps
    ///
    /// Returns `None` when the claim timestamps are outside the
    /// representable range.
    pub fn from_claims(user_id: Uuid, token_hash: String, claims: &RefreshClaims) -> Option<Self> {
        Some(Self {
            id: Uuid::new_v4(),
            user_id,
            token_hash,
            created_at: claims.0.issued_at()?,
            expires_at: claims.0.expires_at()?,
        })
    }

    /// A record is live while `now` is strictly before its expiry
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Token pair returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Signed access token
    pub access_token: String,

    /// Signed refresh token
    pub refresh_token: String,

    /// Access token expiry time in seconds
    pub access_expires_in: i64,

    /// Refresh token expiry time in seconds
    pub refresh_expires_in: i64,
}

impl TokenPair {
    /// Creates a new token pair with the configured expiry windows
    pub fn new(
        access_token: String,
        refresh_token: String,
        access_expires_in: i64,
        refresh_expires_in: i64,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            access_expires_in,
            refresh_expires_in,
        }
    }
}
