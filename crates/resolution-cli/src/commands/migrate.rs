//! Database migration command.

use resolution_core::config::{AppConfig, DatabaseProvider};
use resolution_core::error::AppError;
use resolution_database::DatabasePool;
use resolution_database::migration::run_migrations;

use crate::output;

/// Run all pending migrations against the configured database.
pub async fn execute(config: &AppConfig) -> Result<(), AppError> {
    if config.database.provider != DatabaseProvider::Postgres {
        return Err(AppError::configuration(
            "Migrations only apply to database.provider = \"postgres\"",
        ));
    }

    let pool = DatabasePool::connect(&config.database).await?;
    println!("Running database migrations...");
    run_migrations(pool.pool()).await?;
    pool.close().await;

    output::print_success("All migrations applied successfully.");
    Ok(())
}
