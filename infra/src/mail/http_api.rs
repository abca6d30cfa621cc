//! HTTP JSON API mailer implementation.
//!
//! Sends mail through a provider exposing a JSON-over-HTTP send endpoint
//! with bearer authentication. The response body is expected to carry the
//! provider's message id as `{"id": "..."}`.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use sigil_core::services::Mailer;
use sigil_shared::config::mail::MailConfig;

use crate::mail::{confirmation_link, mask_email, reset_link};
use crate::InfrastructureError;

/// Timeout for mail API requests
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Mailer backed by an HTTP JSON API provider
pub struct HttpApiMailer {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    sender: String,
    frontend_base_url: String,
}

/// Outbound message payload in the provider's wire format
#[derive(Serialize)]
struct MailPayload<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: String,
}

/// Provider response carrying the message id
#[derive(Deserialize)]
struct SendResponse {
    id: Option<String>,
}

impl HttpApiMailer {
    /// Create a new HTTP mailer from configuration
    ///
    /// Fails when the endpoint or api key is missing, or the HTTP client
    /// cannot be constructed.
    pub fn new(config: MailConfig) -> Result<Self, InfrastructureError> {
        let api_url = config
            .api_url
            .ok_or_else(|| InfrastructureError::Config("MAIL_API_URL not set".to_string()))?;
        let api_key = config
            .api_key
            .ok_or_else(|| InfrastructureError::Config("MAIL_API_KEY not set".to_string()))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        info!("HTTP mailer initialized for endpoint: {}", api_url);

        Ok(Self {
            client,
            api_url,
            api_key,
            sender: config.sender,
            frontend_base_url: config.frontend_base_url,
        })
    }

    async fn deliver(&self, to: &str, subject: &str, html: String) -> Result<String, String> {
        let payload = MailPayload {
            from: &self.sender,
            to,
            subject,
            html,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!("Mail API request failed: {}", e);
                format!("mail request failed: {}", e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Mail API returned {}: {}", status, body);
            return Err(format!("mail provider returned {}", status));
        }

        let message_id = response
            .json::<SendResponse>()
            .await
            .ok()
            .and_then(|r| r.id)
            .unwrap_or_else(|| "unknown".to_string());

        info!(
            to = %mask_email(to),
            message_id = %message_id,
            "Mail accepted by provider"
        );

        Ok(message_id)
    }
}

fn confirmation_body(link: &str) -> String {
    format!(
        "<p>Welcome! Confirm your email address to activate your account:</p>\
         <p><a href=\"{link}\">{link}</a></p>\
         <p>If you did not sign up, you can ignore this mail.</p>"
    )
}

fn reset_body(link: &str) -> String {
    format!(
        "<p>A password reset was requested for your account:</p>\
         <p><a href=\"{link}\">{link}</a></p>\
         <p>The link can be used once. If you did not request a reset, you \
         can ignore this mail.</p>"
    )
}

#[async_trait]
impl Mailer for HttpApiMailer {
    async fn send_confirmation_email(&self, to: &str, token: &str) -> Result<String, String> {
        let link = confirmation_link(&self.frontend_base_url, token);
        self.deliver(to, "Confirm your email address", confirmation_body(&link))
            .await
    }

    async fn send_password_reset_email(&self, to: &str, token: &str) -> Result<String, String> {
        let link = reset_link(&self.frontend_base_url, token);
        self.deliver(to, "Reset your password", reset_body(&link))
            .await
    }

    fn provider_name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> MailConfig {
        MailConfig {
            provider: "http".to_string(),
            api_url: Some("https://mail.example.com/v1/send".to_string()),
            api_key: Some("secret-key".to_string()),
            sender: "no-reply@example.com".to_string(),
            frontend_base_url: "https://app.example.com".to_string(),
        }
    }

    #[test]
    fn test_new_requires_endpoint_and_key() {
        let mut incomplete = config();
        incomplete.api_url = None;
        assert!(HttpApiMailer::new(incomplete).is_err());

        let mut incomplete = config();
        incomplete.api_key = None;
        assert!(HttpApiMailer::new(incomplete).is_err());

        assert!(HttpApiMailer::new(config()).is_ok());
    }

    #[test]
    fn test_payload_wire_format() {
        let payload = MailPayload {
            from: "no-reply@example.com",
            to: "user@example.com",
            subject: "Confirm your email address",
            html: confirmation_body("https://app.example.com/verify-email/tok"),
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["from"], "no-reply@example.com");
        assert_eq!(value["to"], "user@example.com");
        assert_eq!(value["subject"], "Confirm your email address");
        assert!(value["html"]
            .as_str()
            .unwrap()
            .contains("https://app.example.com/verify-email/tok"));
    }

    #[test]
    fn test_bodies_embed_link() {
        let body = reset_body("https://app.example.com/reset-password/tok");
        assert!(body.contains("href=\"https://app.example.com/reset-password/tok\""));
        assert!(body.contains("used once"));
    }

    #[test]
    fn test_message_id_parsing() {
        let parsed: SendResponse = serde_json::from_str(r#"{"id": "msg-42"}"#).unwrap();
        assert_eq!(parsed.id.as_deref(), Some("msg-42"));

        // Providers that return an empty object still count as accepted
        let parsed: SendResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.id.is_none());
    }
}
