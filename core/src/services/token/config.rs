//! Configuration for the token codec and store

use chrono::Duration;

use sigil_shared::config::JwtConfig;

use crate::domain::entities::token::TokenKind;

/// Signing and lifetime settings shared by the codec and the store
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// HMAC signing secret, also the key for refresh token hashing
    pub secret: String,
    /// Issuer claim stamped into and required from every token
    pub issuer: String,
    /// Validity window for access tokens
    pub access_window: Duration,
    /// Validity window for refresh tokens
    pub refresh_window: Duration,
}

impl TokenConfig {
    /// Builds the config from the application-level JWT settings
    pub fn from_jwt(config: &JwtConfig) -> Self {
        Self {
            secret: config.secret.clone(),
            issuer: config.issuer.clone(),
            access_window: Duration::seconds(config.access_token_expiry),
            refresh_window: Duration::seconds(config.refresh_token_expiry),
        }
    }

    /// The validity window for the given token kind
    pub fn window(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Access => self.access_window,
            TokenKind::Refresh => self.refresh_window,
        }
    }

    pub fn window_seconds(&self, kind: TokenKind) -> i64 {
        self.window(kind).num_seconds()
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: "development-secret-please-change-in-production".to_string(),
            issuer: "sigil".to_string(),
            access_window: Duration::minutes(15),
            refresh_window: Duration::days(7),
        }
    }
}
