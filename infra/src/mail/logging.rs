//! Logging mailer for development environments.
//!
//! Writes the full verification link to the log instead of delivering
//! anything, so local flows can be completed by copying the link out of
//! the console.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tracing::info;

use sigil_core::services::Mailer;

use crate::mail::{confirmation_link, mask_email, reset_link};

/// Mailer that logs links instead of sending mail
pub struct LoggingMailer {
    frontend_base_url: String,
    sent: AtomicU64,
}

impl LoggingMailer {
    pub fn new(frontend_base_url: String) -> Self {
        Self {
            frontend_base_url,
            sent: AtomicU64::new(0),
        }
    }

    /// Number of mails logged so far
    pub fn sent_count(&self) -> u64 {
        self.sent.load(Ordering::SeqCst)
    }

    fn next_id(&self) -> String {
        let n = self.sent.fetch_add(1, Ordering::SeqCst) + 1;
        format!("log-{}", n)
    }
}

#[async_trait]
impl Mailer for LoggingMailer {
    async fn send_confirmation_email(&self, to: &str, token: &str) -> Result<String, String> {
        let link = confirmation_link(&self.frontend_base_url, token);
        info!(
            to = %mask_email(to),
            %link,
            "Would send confirmation mail"
        );
        Ok(self.next_id())
    }

    async fn send_password_reset_email(&self, to: &str, token: &str) -> Result<String, String> {
        let link = reset_link(&self.frontend_base_url, token);
        info!(
            to = %mask_email(to),
            %link,
            "Would send password reset mail"
        );
        Ok(self.next_id())
    }

    fn provider_name(&self) -> &str {
        "log"
    }
}
