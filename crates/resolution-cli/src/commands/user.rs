//! User management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use resolution_core::config::AppConfig;
use resolution_core::error::AppError;
use resolution_database::UserRepository;
use resolution_entity::user::User;
use resolution_service::AdminUserService;

use crate::output::{self, OutputFormat};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// List all users
    List,
    /// Show one user
    Show {
        /// Email address
        email: String,
    },
    /// Grant administrator rights
    Promote {
        /// Email address
        email: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Revoke administrator rights
    Demote {
        /// Email address
        email: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    phone: String,
    verified: bool,
    admin: bool,
    created_at: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            name: u.full_name(),
            email: u.email.clone(),
            phone: u.phone.clone().unwrap_or_default(),
            verified: u.verified,
            admin: u.is_admin,
            created_at: u.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let repositories = super::connect(config).await?;
    let admin = AdminUserService::new(repositories.users.clone());

    match &args.command {
        UserCommand::List => {
            let users = repositories.users.find_all().await?;
            let rows: Vec<UserRow> = users.iter().map(UserRow::from).collect();
            output::print_list(&rows, format);
        }
        UserCommand::Show { email } => {
            let user = admin.find_by_email(email).await?;
            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&user)?);
                }
                OutputFormat::Table => {
                    output::print_kv("ID", &user.id.to_string());
                    output::print_kv("Name", &user.full_name());
                    output::print_kv("Email", &user.email);
                    output::print_kv("Phone", user.phone.as_deref().unwrap_or("-"));
                    output::print_kv("Verified", &user.verified.to_string());
                    output::print_kv("Admin", &user.is_admin.to_string());
                    output::print_kv("Created", &user.created_at.to_rfc3339());
                }
            }
        }
        UserCommand::Promote { email, yes } => {
            set_admin(&admin, email, true, *yes).await?;
        }
        UserCommand::Demote { email, yes } => {
            set_admin(&admin, email, false, *yes).await?;
        }
    }

    repositories.close().await;
    Ok(())
}

async fn set_admin(
    admin: &AdminUserService,
    email: &str,
    is_admin: bool,
    skip_prompt: bool,
) -> Result<(), AppError> {
    let user = admin.find_by_email(email).await?;
    if user.is_admin == is_admin {
        output::print_success(&format!(
            "'{}' is already {}",
            user.email,
            if is_admin { "an administrator" } else { "a regular user" }
        ));
        return Ok(());
    }

    if !skip_prompt {
        let prompt = if is_admin {
            format!("Grant administrator rights to '{}'?", user.email)
        } else {
            format!("Revoke administrator rights from '{}'?", user.email)
        };
        let confirm = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

        if !confirm {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let user = admin.set_admin(&user.email, is_admin).await?;
    output::print_success(&format!(
        "'{}' is now {}",
        user.email,
        if is_admin { "an administrator" } else { "a regular user" }
    ));
    Ok(())
}
