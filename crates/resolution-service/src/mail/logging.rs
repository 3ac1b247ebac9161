//! Development mailer that logs instead of sending.

use async_trait::async_trait;
use tracing::info;

use resolution_core::AppResult;

use super::{MailMessage, Mailer};

/// Writes every message to the `mail` tracing target.
#[derive(Debug, Clone, Default)]
pub struct LogMailer;

impl LogMailer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: &MailMessage) -> AppResult<()> {
        info!(
            target: "mail",
            to = %message.to_email,
            subject = %message.subject,
            body = %message.text,
            "Email not sent (log mailer)"
        );
        Ok(())
    }
}
