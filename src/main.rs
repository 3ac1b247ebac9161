//! Resolution server: claims and requests backend.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

use resolution_api::{AppState, build_app};
use resolution_core::config::AppConfig;
use resolution_core::error::AppError;
use resolution_database::Repositories;
use resolution_service::VerificationService;
use resolution_service::mail::build_mailer;
use resolution_worker::CronScheduler;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file, environment overlay and variables
fn load_configuration() -> Result<AppConfig, AppError> {
    let config_path =
        std::env::var("RESOLUTION_CONFIG").unwrap_or_else(|_| "config/default".to_string());
    let env = std::env::var("RESOLUTION_ENV").unwrap_or_else(|_| "development".to_string());

    AppConfig::load(&config_path, &env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Resolution v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Repositories (and migrations) ────────────────────
    tracing::info!(provider = ?config.database.provider, "Connecting to database...");
    let repositories = Repositories::connect(&config.database).await?;

    // ── Step 2: Mailer ───────────────────────────────────────────
    let mailer = build_mailer(&config.mail)?;

    // ── Step 3: Services and HTTP state ──────────────────────────
    let state = AppState::new(config.clone(), repositories.clone(), Arc::clone(&mailer));

    // ── Step 4: Scheduled tasks ──────────────────────────────────
    let mut scheduler = if config.worker.enabled {
        let verification: Arc<VerificationService> = Arc::clone(&state.verification_service);
        let scheduler = CronScheduler::new(verification).await?;
        scheduler.register_default_tasks(&config.verification).await?;
        scheduler.start().await?;
        Some(scheduler)
    } else {
        tracing::info!("Worker disabled; expired codes are only removed by their timers");
        None
    };

    // ── Step 5: HTTP server ──────────────────────────────────────
    let app = build_app(state);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Resolution server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // ── Step 6: Shutdown ─────────────────────────────────────────
    tracing::info!("Shutting down...");
    if let Some(scheduler) = scheduler.as_mut() {
        if let Err(e) = scheduler.shutdown().await {
            tracing::warn!("Scheduler shutdown failed: {}", e);
        }
    }

    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    if tokio::time::timeout(grace, repositories.close()).await.is_err() {
        tracing::warn!("Timed out closing database connections");
    }

    tracing::info!("Resolution stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
