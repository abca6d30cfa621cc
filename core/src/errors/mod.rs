//! Unified error handling for the core domain
//!
//! Service methods return [`DomainResult`]; specific failures from the
//! auth, token, and verification subsystems convert into [`DomainError`]
//! through the transparent bridges below, so `?` works across layers.

mod types;

pub use types::{AuthError, TokenError, VerificationError};

use thiserror::Error;

/// Top-level error type for all domain operations
#[derive(Error, Debug, PartialEq)]
pub enum DomainError {
    /// Input failed domain validation
    #[error("Validation failed: {message}")]
    Validation { message: String },

    /// A referenced resource does not exist
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// Infrastructure failure (database, mail transport, ...)
    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Verification(#[from] VerificationError),
}

impl DomainError {
    /// Shorthand for validation failures built from string-ish input
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        DomainError::NotFound {
            resource: resource.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal {
            message: message.into(),
        }
    }
}

/// Result alias used throughout the core crate
pub type DomainResult<T> = Result<T, DomainError>;
