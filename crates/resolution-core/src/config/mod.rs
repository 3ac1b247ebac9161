//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section, and every field carries a default so an empty file is valid.

pub mod app;
pub mod auth;
pub mod database;
pub mod logging;
pub mod mail;
pub mod verification;
pub mod worker;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::AuthConfig;
pub use self::database::{DatabaseConfig, DatabaseProvider};
pub use self::logging::LoggingConfig;
pub use self::mail::{MailConfig, MailProvider};
pub use self::verification::VerificationConfig;
pub use self::worker::WorkerConfig;

use crate::error::AppError;

/// Environment variable prefix used for overrides, e.g.
/// `RESOLUTION__DATABASE__URL`.
pub const ENV_PREFIX: &str = "RESOLUTION";

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Authentication settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// One-time verification code settings.
    #[serde(default)]
    pub verification: VerificationConfig,
    /// Outbound mail settings.
    #[serde(default)]
    pub mail: MailConfig,
    /// Background worker settings.
    #[serde(default)]
    pub worker: WorkerConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `config_file`, an optional `config/{env}` overlay, and
    /// environment variables prefixed with `RESOLUTION__`.
    pub fn load(config_file: &str, env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(config_file).required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let loaded: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        loaded.validate()?;
        Ok(loaded)
    }

    /// Reject combinations that would fail later at startup.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.database.provider == DatabaseProvider::Postgres && self.database.url.is_empty() {
            return Err(AppError::configuration(
                "database.url is required when database.provider = \"postgres\"",
            ));
        }
        if self.auth.jwt_secret.len() < 16 {
            return Err(AppError::configuration(
                "auth.jwt_secret must be at least 16 characters",
            ));
        }
        let code_ttl = self.verification.code_ttl_seconds;
        if code_ttl == 0 || code_ttl > verification::MAX_CODE_TTL_SECONDS {
            return Err(AppError::configuration(format!(
                "verification.code_ttl_seconds must be between 1 and {}",
                verification::MAX_CODE_TTL_SECONDS
            )));
        }
        let token_ttl = self.auth.token_ttl_minutes;
        if token_ttl == 0 || token_ttl > auth::MAX_TOKEN_TTL_MINUTES {
            return Err(AppError::configuration(format!(
                "auth.token_ttl_minutes must be between 1 and {}",
                auth::MAX_TOKEN_TTL_MINUTES
            )));
        }
        if self.mail.provider == MailProvider::Http && self.mail.api_key.is_empty() {
            return Err(AppError::configuration(
                "mail.api_key is required when mail.provider = \"http\"",
            ));
        }
        Ok(())
    }
}
