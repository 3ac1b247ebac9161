//! Outbound email.
//!
//! [`Mailer`] is the seam; [`LogMailer`] writes messages to the log and
//! [`HttpMailer`] posts them to a MailerSend-compatible API.

pub mod http;
pub mod logging;
pub mod template;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use resolution_core::AppResult;
use resolution_core::config::{MailConfig, MailProvider};

pub use self::http::HttpMailer;
pub use self::logging::LogMailer;

/// A rendered message ready for delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailMessage {
    pub to_email: String,
    pub to_name: String,
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Delivers rendered messages.
#[async_trait]
pub trait Mailer: Send + Sync + std::fmt::Debug + 'static {
    async fn send(&self, message: &MailMessage) -> AppResult<()>;
}

/// Build the mailer selected by configuration.
pub fn build_mailer(config: &MailConfig) -> AppResult<Arc<dyn Mailer>> {
    match config.provider {
        MailProvider::Log => {
            info!("Using log mailer; verification codes are written to the log");
            Ok(Arc::new(LogMailer::new()))
        }
        MailProvider::Http => {
            info!(api_url = %config.api_url, "Using HTTP mailer");
            Ok(Arc::new(HttpMailer::new(config)?))
        }
    }
}
