//! Mail delivery configuration module

use serde::{Deserialize, Serialize};

/// Mail delivery configuration
///
/// Verification and password-reset mails carry links into the frontend
/// application, so the frontend base URL lives here next to the provider
/// credentials.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    /// Mail provider ("http" for the HTTP API client, "mock" for development)
    pub provider: String,

    /// HTTP API endpoint of the mail provider
    #[serde(default)]
    pub api_url: Option<String>,

    /// API key for the mail provider
    #[serde(default)]
    pub api_key: Option<String>,

    /// Sender address for outgoing mail
    pub sender: String,

    /// Base URL of the frontend application used in mailed links
    pub frontend_base_url: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            provider: String::from("mock"),
            api_url: None,
            api_key: None,
            sender: String::from("no-reply@sigil.local"),
            frontend_base_url: String::from("http://localhost:3000"),
        }
    }
}

impl MailConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            provider: std::env::var("MAIL_PROVIDER").unwrap_or_else(|_| "mock".to_string()),
            api_url: std::env::var("MAIL_API_URL").ok(),
            api_key: std::env::var("MAIL_API_KEY").ok(),
            sender: std::env::var("MAIL_SENDER")
                .unwrap_or_else(|_| "no-reply@sigil.local".to_string()),
            frontend_base_url: std::env::var("FRONTEND_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
        }
    }
}
