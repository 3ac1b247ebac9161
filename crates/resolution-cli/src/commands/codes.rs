//! Verification code maintenance commands.

use std::sync::Arc;

use clap::{Args, Subcommand};

use resolution_core::config::AppConfig;
use resolution_core::error::AppError;
use resolution_service::VerificationService;
use resolution_service::mail::build_mailer;
use resolution_worker::jobs::sweep_expired_codes;

use crate::output;

/// Arguments for code commands
#[derive(Debug, Args)]
pub struct CodesArgs {
    #[command(subcommand)]
    pub command: CodesCommand,
}

/// Code subcommands
#[derive(Debug, Subcommand)]
pub enum CodesCommand {
    /// Delete every expired verification code now
    Sweep,
}

/// Execute code commands
pub async fn execute(args: &CodesArgs, config: &AppConfig) -> Result<(), AppError> {
    let repositories = super::connect(config).await?;

    match &args.command {
        CodesCommand::Sweep => {
            let verification = VerificationService::new(
                Arc::clone(&repositories.users),
                Arc::clone(&repositories.verifications),
                build_mailer(&config.mail)?,
                &config.verification,
            );
            let removed = sweep_expired_codes(&verification).await?;
            output::print_success(&format!("Removed {removed} expired verification code(s)"));
        }
    }

    repositories.close().await;
    Ok(())
}
