//! # Sigil Core
//!
//! Core business logic and domain layer for the Sigil authentication
//! service. This crate contains the domain entities, the token codec and
//! store, the session and verification services, repository interfaces,
//! and error types. It knows nothing about HTTP or MySQL; those live in
//! the api and infra crates.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
