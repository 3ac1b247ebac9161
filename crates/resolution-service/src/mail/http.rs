//! MailerSend-compatible HTTP mailer.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};

use resolution_core::AppResult;
use resolution_core::config::MailConfig;
use resolution_core::error::{AppError, ErrorKind};

use super::{MailMessage, Mailer};

/// Sends mail through a JSON API authenticated with a bearer key.
#[derive(Clone)]
pub struct HttpMailer {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    from_email: String,
    from_name: String,
}

impl std::fmt::Debug for HttpMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpMailer")
            .field("api_url", &self.api_url)
            .field("from_email", &self.from_email)
            .finish()
    }
}

#[derive(Serialize)]
struct Address<'a> {
    email: &'a str,
    name: &'a str,
}

#[derive(Serialize)]
struct Payload<'a> {
    from: Address<'a>,
    to: [Address<'a>; 1],
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

impl HttpMailer {
    /// Build a mailer from configuration.
    pub fn new(config: &MailConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            from_email: config.from_email.clone(),
            from_name: config.from_name.clone(),
        })
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, message: &MailMessage) -> AppResult<()> {
        let payload = Payload {
            from: Address {
                email: &self.from_email,
                name: &self.from_name,
            },
            to: [Address {
                email: &message.to_email,
                name: &message.to_name,
            }],
            subject: &message.subject,
            html: &message.html,
            text: &message.text,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::ExternalService, "Mail provider unreachable", e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, body = %body, "Mail provider rejected message");
            return Err(AppError::external(format!(
                "Mail provider returned {status}"
            )));
        }

        debug!(to = %message.to_email, "Email accepted by provider");
        Ok(())
    }
}
