//! Verification token service module
//!
//! Single-use tokens for proving control of an email address:
//! - Opaque UUID tokens stored in the user's one verification slot
//! - Email confirmation (enables the account) and password reset flows
//! - Password reset revokes every outstanding refresh token

pub mod mocks;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use mocks::{MockMailer, MockPasswordHasher, SentMail};
pub use service::VerificationTokenService;
pub use traits::{Mailer, PasswordHasher};
pub use types::VerificationPurpose;
