//! Shared utilities and common types for the Sigil server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Validation utilities

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, DatabaseConfig, Environment, JwtConfig, MailConfig, ServerConfig,
    SessionConfig, VerificationConfig,
};
pub use utils::validation;
