//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the Sigil service.
//! It provides the concrete implementations behind the traits the core
//! crate defines: database access, password hashing, and mail delivery.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: MySQL repositories and connection pooling using SQLx
//! - **Security**: Bcrypt password hashing
//! - **Mail**: Outbound mail via an HTTP JSON API, with a logging
//!   implementation for development
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

// Re-export core error types for convenience
pub use sigil_core::errors::*;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Mail delivery module - HTTP API and logging mailers
pub mod mail;

/// Security module - password hashing
pub mod security;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
