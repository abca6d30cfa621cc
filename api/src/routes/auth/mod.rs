//! Authentication route handlers
//!
//! The whole account lifecycle lives under `/api/v1/auth`:
//! - Registration and email confirmation
//! - Login, session refresh, and logout
//! - Password reset in two steps
//!
//! Handlers validate the payload, call into the core services held in
//! [`AppState`], and map failures through the shared error handler.

mod cookies;
pub mod forgot_password;
pub mod login;
pub mod logout;
pub mod refresh;
pub mod register;
pub mod reset_password;
pub mod verify_email;

pub use forgot_password::forgot_password;
pub use login::login;
pub use logout::logout;
pub use refresh::refresh;
pub use register::register;
pub use reset_password::reset_password;
pub use verify_email::verify_email;

use std::sync::Arc;

use sigil_core::repositories::{RefreshTokenRepository, UserRepository};
use sigil_core::services::{
    Mailer, PasswordHasher, SessionIssuer, SignedTokenCodec, VerificationTokenService,
};
use sigil_shared::config::SessionConfig;

/// Shared application state handed to every handler.
///
/// Generic over the repositories and the hasher so integration tests can
/// run the full HTTP stack against in-memory doubles.
pub struct AppState<U, R, H>
where
    U: UserRepository,
    R: RefreshTokenRepository,
    H: PasswordHasher,
{
    /// User lookups and writes
    pub users: Arc<U>,
    /// Password hashing and verification
    pub hasher: Arc<H>,
    /// Token codec, shared with the auth middleware
    pub codec: Arc<SignedTokenCodec>,
    /// Session lifecycle: login, refresh, logout
    pub sessions: Arc<SessionIssuer<U, R>>,
    /// Verification token issue and consume flows
    pub verification: Arc<VerificationTokenService<U, R, H>>,
    /// Mail delivery for verification and reset tokens
    pub mailer: Arc<dyn Mailer>,
    /// Refresh cookie settings
    pub session_config: SessionConfig,
}
