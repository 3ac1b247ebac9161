//! CLI command definitions and dispatch.

pub mod codes;
pub mod migrate;
pub mod user;

use clap::{Parser, Subcommand};

use resolution_core::config::AppConfig;
use resolution_core::error::AppError;
use resolution_database::Repositories;

use crate::output::OutputFormat;

/// Resolution: claims and requests backend administration
#[derive(Debug, Parser)]
#[command(name = "resolution-cli", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default")]
    pub config: String,

    /// Environment overlay to load from `config/{env}.toml`
    #[arg(short, long, env = "RESOLUTION_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Apply pending database migrations
    Migrate,
    /// User management
    User(user::UserArgs),
    /// Verification code maintenance
    Codes(codes::CodesArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = AppConfig::load(&self.config, &self.env)?;

        match &self.command {
            Commands::Migrate => migrate::execute(&config).await,
            Commands::User(args) => user::execute(args, &config, self.format).await,
            Commands::Codes(args) => codes::execute(args, &config).await,
        }
    }
}

/// Helper: connect the repositories described by the configuration
pub async fn connect(config: &AppConfig) -> Result<Repositories, AppError> {
    Repositories::connect(&config.database).await
}
