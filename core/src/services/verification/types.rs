//! Types for the verification token service

/// What a verification token is allowed to be consumed for.
///
/// The purpose picks the validity window: confirmation links live for
/// hours, password reset links for minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationPurpose {
    /// Confirming ownership of the registration email
    EmailConfirmation,
    /// Authorizing a password reset
    PasswordReset,
}

impl std::fmt::Display for VerificationPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerificationPurpose::EmailConfirmation => write!(f, "email confirmation"),
            VerificationPurpose::PasswordReset => write!(f, "password reset"),
        }
    }
}
