//! Common validation utilities

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9+_.-]+@.+$").expect("email pattern is valid"));

/// Common validation functions
pub mod validators {
    use super::EMAIL_PATTERN;

    /// Check if an email address has an acceptable shape
    pub fn is_valid_email(email: &str) -> bool {
        EMAIL_PATTERN.is_match(email)
    }

    /// Check password strength: at least 8 characters with one lowercase
    /// letter, one uppercase letter, one digit, and one special character.
    pub fn is_strong_password(password: &str) -> bool {
        password.chars().count() >= 8
            && password.chars().any(|c| c.is_lowercase())
            && password.chars().any(|c| c.is_uppercase())
            && password.chars().any(|c| c.is_ascii_digit())
            && password.chars().any(|c| !c.is_alphanumeric())
    }
}

#[cfg(test)]
mod tests {
    use super::validators::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last-name+tag@example.org"));
        assert!(is_valid_email("user_name@localhost"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("@missing-local.com"));
        assert!(!is_valid_email("missing-domain@"));
        assert!(!is_valid_email("spaced local@example.com"));
    }

    #[test]
    fn test_strong_passwords() {
        assert!(is_strong_password("Abcd1234!"));
        assert!(is_strong_password("pass_Word9"));
    }

    #[test]
    fn test_weak_passwords() {
        // Too short
        assert!(!is_strong_password("Ab1!x"));
        // Missing uppercase
        assert!(!is_strong_password("abcd1234!"));
        // Missing lowercase
        assert!(!is_strong_password("ABCD1234!"));
        // Missing digit
        assert!(!is_strong_password("Abcdefgh!"));
        // Missing special character
        assert!(!is_strong_password("Abcd12345"));
    }
}
