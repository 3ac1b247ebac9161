//! Cron scheduler for periodic maintenance tasks.

use std::sync::Arc;

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing::{error, info};

use resolution_core::config::VerificationConfig;
use resolution_core::error::AppError;
use resolution_service::VerificationService;

use crate::jobs::sweep_expired_codes;

/// Cron-based scheduler for periodic background tasks.
pub struct CronScheduler {
    scheduler: JobScheduler,
    verification: Arc<VerificationService>,
}

impl std::fmt::Debug for CronScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CronScheduler").finish()
    }
}

impl CronScheduler {
    /// Create a new cron scheduler.
    pub async fn new(verification: Arc<VerificationService>) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {e}")))?;

        Ok(Self {
            scheduler,
            verification,
        })
    }

    /// Register all scheduled tasks.
    pub async fn register_default_tasks(&self, config: &VerificationConfig) -> Result<(), AppError> {
        self.register_code_sweep(&config.sweep_cron).await?;
        info!("All scheduled tasks registered");
        Ok(())
    }

    /// Start the scheduler.
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {e}")))?;

        info!("Cron scheduler started");
        Ok(())
    }

    /// Shut the scheduler down.
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shut down scheduler: {e}")))?;

        info!("Cron scheduler shut down");
        Ok(())
    }

    async fn register_code_sweep(&self, schedule: &str) -> Result<(), AppError> {
        let verification = Arc::clone(&self.verification);
        let job = CronJob::new_async(schedule, move |_uuid, _lock| {
            let verification = Arc::clone(&verification);
            Box::pin(async move {
                if let Err(e) = sweep_expired_codes(&verification).await {
                    error!(error = %e, "Verification code sweep failed");
                }
            })
        })
        .map_err(|e| {
            AppError::configuration(format!(
                "Invalid verification.sweep_cron '{schedule}': {e}"
            ))
        })?;

        self.scheduler.add(job).await.map_err(|e| {
            AppError::internal(format!("Failed to add code sweep schedule: {e}"))
        })?;

        info!(schedule, "Registered: verification code sweep");
        Ok(())
    }
}
