//! Domain-specific error types for authentication and token operations
//!
//! Every variant here is terminal for the request that hit it; the core
//! never retries on its own. HTTP status mapping lives in the api layer.

use thiserror::Error;

use crate::domain::entities::token::TokenKind;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown email and wrong password share one variant so responses
    /// cannot reveal which part was wrong.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The account exists but its email has not been confirmed yet
    #[error("Account is not enabled")]
    AccountDisabled,

    #[error("Email already in use")]
    UserAlreadyExists,

    #[error("Password hashing failed: {reason}")]
    HashingFailed { reason: String },
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Signature checked out but the validity window has elapsed
    #[error("Token expired")]
    Expired,

    /// Bad encoding, tampered payload, or wrong key
    #[error("Token is malformed or carries an invalid signature")]
    MalformedOrInvalidSignature,

    /// Signature valid but the token kind does not match the call site
    #[error("Wrong token kind, expected {expected}")]
    WrongKind { expected: TokenKind },

    /// Signature valid but the store holds no live matching record.
    /// Covers logout, rotation supersession, and never-issued tokens alike.
    #[error("Token has been revoked or is unknown")]
    RevokedOrUnknown,

    #[error("Token generation failed: {reason}")]
    GenerationFailed { reason: String },
}

/// Verification-token errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    /// Lookup miss and expiry are deliberately indistinguishable so callers
    /// cannot probe which tokens once existed.
    #[error("Verification token is invalid or expired")]
    NotFound,
}
