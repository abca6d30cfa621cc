//! Business services containing domain logic and use cases.

pub mod session;
pub mod token;
pub mod verification;

// Re-export commonly used types
pub use session::SessionIssuer;
pub use token::{RefreshTokenStore, SignedTokenCodec, TokenConfig};
pub use verification::{Mailer, PasswordHasher, VerificationPurpose, VerificationTokenService};
