//! Authentication request and response payloads

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use sigil_shared::utils::validation::validators;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address to register; matched case-insensitively at login
    #[validate(custom = "valid_email")]
    pub email: String,

    /// Plaintext password; only its hash is ever stored
    #[validate(
        length(min = 8, max = 128, message = "Password must be 8 to 128 characters"),
        custom = "strong_password"
    )]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(custom = "valid_email")]
    pub email: String,

    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
}

/// Carries the token from the confirmation link mailed at registration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyEmailRequest {
    #[validate(length(min = 1, message = "Token must not be empty"))]
    pub token: String,
}

/// First step of the password reset: ask for the mail
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(custom = "valid_email")]
    pub email: String,
}

/// Second step of the password reset: consume the mailed token
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1, message = "Token must not be empty"))]
    pub token: String,

    #[validate(
        length(min = 8, max = 128, message = "Password must be 8 to 128 characters"),
        custom = "strong_password"
    )]
    pub new_password: String,
}

/// Access token handed to a logged-in session.
///
/// The refresh token is deliberately absent: it only ever travels in the
/// HttpOnly cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub access_token: String,

    /// Always "Bearer"
    pub token_type: String,

    /// Access token lifetime in seconds
    pub expires_in: i64,
}

impl SessionResponse {
    pub fn new(access_token: impl Into<String>, expires_in: i64) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: "Bearer".to_string(),
            expires_in,
        }
    }
}

/// Plain message body for flows that return no data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

fn valid_email(email: &str) -> Result<(), ValidationError> {
    if validators::is_valid_email(email) {
        return Ok(());
    }
    let mut error = ValidationError::new("invalid_email");
    error.message = Some("Invalid email address".into());
    Err(error)
}

fn strong_password(password: &str) -> Result<(), ValidationError> {
    if validators::is_strong_password(password) {
        return Ok(());
    }
    let mut error = ValidationError::new("weak_password");
    error.message = Some(
        "Password needs upper and lower case letters, a digit, and a special character".into(),
    );
    Err(error)
}
