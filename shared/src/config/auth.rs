//! Authentication and token lifecycle configuration

use serde::{Deserialize, Serialize};

/// Placeholder secret used when JWT_SECRET is not configured.
/// `main` refuses to start in production while this is in effect.
const DEFAULT_JWT_SECRET: &str = "your-secret-key-change-in-production";

/// Signed-token (JWT) configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Secret key used to sign and verify tokens
    pub secret: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// Refresh token expiry time in seconds
    pub refresh_token_expiry: i64,

    /// JWT issuer claim
    pub issuer: String,

    /// Algorithm for JWT signing (default: HS256)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_JWT_SECRET),
            access_token_expiry: 900,     // 15 minutes
            refresh_token_expiry: 604800, // 7 days
            issuer: String::from("sigil"),
            algorithm: default_algorithm(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days * 86400;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_JWT_SECRET
    }
}

/// Refresh-token cookie configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Name of the cookie carrying the refresh token
    pub cookie_name: String,

    /// Cookie secure flag (HTTPS only); enable in production
    pub secure: bool,

    /// Cookie SameSite attribute
    pub same_site: String,

    /// Cookie HttpOnly flag
    #[serde(default = "default_http_only")]
    pub http_only: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: String::from("refresh_token"),
            secure: false, // Set to true in production
            same_site: String::from("Lax"),
            http_only: default_http_only(),
        }
    }
}

/// Verification-token window configuration
///
/// Controls how long the single-use tokens mailed to users stay valid.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Email-confirmation token lifetime in hours
    pub email_confirmation_expiry_hours: i64,

    /// Password-reset token lifetime in minutes
    pub password_reset_expiry_minutes: i64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            email_confirmation_expiry_hours: 24,
            password_reset_expiry_minutes: 10,
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Refresh-cookie configuration
    #[serde(default)]
    pub session: SessionConfig,

    /// Verification-token windows
    #[serde(default)]
    pub verification: VerificationConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let jwt_secret =
            std::env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string());
        let access_token_expiry = std::env::var("JWT_ACCESS_TOKEN_EXPIRY")
            .unwrap_or_else(|_| "900".to_string())
            .parse()
            .unwrap_or(900);
        let refresh_token_expiry = std::env::var("JWT_REFRESH_TOKEN_EXPIRY")
            .unwrap_or_else(|_| "604800".to_string())
            .parse()
            .unwrap_or(604800);
        let issuer = std::env::var("JWT_ISSUER").unwrap_or_else(|_| "sigil".to_string());
        let cookie_secure = std::env::var("COOKIE_SECURE")
            .map(|value| value == "true" || value == "1")
            .unwrap_or(false);
        let email_confirmation_expiry_hours = std::env::var("MAIL_CONFIRMATION_EXPIRY_HOURS")
            .unwrap_or_else(|_| "24".to_string())
            .parse()
            .unwrap_or(24);
        let password_reset_expiry_minutes = std::env::var("PASSWORD_RESET_EXPIRY_MINUTES")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .unwrap_or(10);

        Self {
            jwt: JwtConfig {
                secret: jwt_secret,
                access_token_expiry,
                refresh_token_expiry,
                issuer,
                algorithm: default_algorithm(),
            },
            session: SessionConfig {
                secure: cookie_secure,
                ..SessionConfig::default()
            },
            verification: VerificationConfig {
                email_confirmation_expiry_hours,
                password_reset_expiry_minutes,
            },
        }
    }

    /// Get JWT secret
    pub fn jwt_secret(&self) -> &str {
        &self.jwt.secret
    }

    /// Get access token expiry in seconds
    pub fn access_token_expiry_seconds(&self) -> i64 {
        self.jwt.access_token_expiry
    }

    /// Get refresh token expiry in seconds
    pub fn refresh_token_expiry_seconds(&self) -> i64 {
        self.jwt.refresh_token_expiry
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            session: SessionConfig::default(),
            verification: VerificationConfig::default(),
        }
    }
}

fn default_algorithm() -> String {
    String::from("HS256")
}

fn default_http_only() -> bool {
    true
}
