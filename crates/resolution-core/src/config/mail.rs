//! Outbound mail configuration.

use serde::{Deserialize, Serialize};

/// Which mail transport delivers verification codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MailProvider {
    /// Write messages to the log instead of sending them.
    #[default]
    Log,
    /// MailerSend-compatible JSON HTTP API.
    Http,
}

/// Mail transport configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// Transport selection.
    #[serde(default)]
    pub provider: MailProvider,
    /// Endpoint of the HTTP mail API.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Bearer token for the HTTP mail API.
    #[serde(default)]
    pub api_key: String,
    /// Sender address.
    #[serde(default = "default_from_email")]
    pub from_email: String,
    /// Sender display name.
    #[serde(default = "default_from_name")]
    pub from_name: String,
    /// HTTP timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            provider: MailProvider::default(),
            api_url: default_api_url(),
            api_key: String::new(),
            from_email: default_from_email(),
            from_name: default_from_name(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.mailersend.com/v1/email".to_string()
}

fn default_from_email() -> String {
    "no-reply@resolution.local".to_string()
}

fn default_from_name() -> String {
    "Resolution".to_string()
}

fn default_timeout() -> u64 {
    10
}
