//! Mail Delivery Module
//!
//! This module provides mail delivery implementations for verification and
//! password-reset mails. It includes an HTTP JSON API client for production
//! and a logging implementation for development.
//!
//! Raw verification tokens arrive from the core; the implementations here
//! turn them into frontend links before anything leaves the process.

pub mod http_api;
pub mod logging;

// Re-export commonly used types
pub use http_api::HttpApiMailer;
pub use logging::LoggingMailer;

use sigil_core::services::Mailer;
use sigil_shared::config::mail::MailConfig;

/// Build the email confirmation link for a token
pub(crate) fn confirmation_link(base_url: &str, token: &str) -> String {
    format!("{}/verify-email/{}", base_url.trim_end_matches('/'), token)
}

/// Build the password reset link for a token
pub(crate) fn reset_link(base_url: &str, token: &str) -> String {
    format!("{}/reset-password/{}", base_url.trim_end_matches('/'), token)
}

/// Mask an email address for log output
///
/// Keeps the first character of the local part and the full domain, so log
/// lines stay correlatable without disclosing the address.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => match local.chars().next() {
            Some(first) => format!("{}***@{}", first, domain),
            None => format!("***@{}", domain),
        },
        None => "***".to_string(),
    }
}

/// Create a mailer based on configuration
///
/// Returns the appropriate mailer implementation based on the provider
/// specified in the configuration. Unknown providers and misconfigured
/// HTTP credentials fall back to the logging implementation.
///
/// # Arguments
///
/// * `config` - Mail configuration containing provider settings
///
/// # Returns
///
/// A boxed mailer implementation
pub fn create_mailer(config: &MailConfig) -> Box<dyn Mailer> {
    match config.provider.as_str() {
        "http" => match HttpApiMailer::new(config.clone()) {
            Ok(mailer) => Box::new(mailer),
            Err(e) => {
                tracing::error!("Failed to initialize HTTP mailer: {}", e);
                tracing::warn!("Falling back to logging mailer");
                Box::new(LoggingMailer::new(config.frontend_base_url.clone()))
            }
        },
        "log" | "mock" => Box::new(LoggingMailer::new(config.frontend_base_url.clone())),
        other => {
            tracing::warn!("Unknown mail provider '{}', using logging implementation", other);
            Box::new(LoggingMailer::new(config.frontend_base_url.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmation_link_building() {
        let link = confirmation_link("https://app.example.com", "tok-123");
        assert_eq!(link, "https://app.example.com/verify-email/tok-123");
    }

    #[test]
    fn test_link_building_trims_trailing_slash() {
        let link = reset_link("https://app.example.com/", "tok-456");
        assert_eq!(link, "https://app.example.com/reset-password/tok-456");
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("alice@example.com"), "a***@example.com");
        assert_eq!(mask_email("@example.com"), "***@example.com");
        assert_eq!(mask_email("not-an-email"), "***");
    }

    #[test]
    fn test_factory_defaults_to_logging_mailer() {
        let config = MailConfig {
            provider: "carrier-pigeon".to_string(),
            ..Default::default()
        };

        let mailer = create_mailer(&config);
        assert_eq!(mailer.provider_name(), "log");
    }

    #[test]
    fn test_factory_falls_back_when_http_unconfigured() {
        // "http" without an endpoint cannot work, so the factory degrades
        let config = MailConfig {
            provider: "http".to_string(),
            api_url: None,
            api_key: None,
            ..Default::default()
        };

        let mailer = create_mailer(&config);
        assert_eq!(mailer.provider_name(), "log");
    }

    #[test]
    fn test_factory_builds_http_mailer() {
        let config = MailConfig {
            provider: "http".to_string(),
            api_url: Some("https://mail.example.com/v1/send".to_string()),
            api_key: Some("key".to_string()),
            ..Default::default()
        };

        let mailer = create_mailer(&config);
        assert_eq!(mailer.provider_name(), "http");
    }
}
