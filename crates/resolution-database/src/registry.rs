//! Selection of the repository backend.

use std::sync::Arc;

use tracing::info;

use resolution_core::AppResult;
use resolution_core::config::{DatabaseConfig, DatabaseProvider};

use crate::connection::DatabasePool;
use crate::memory::MemoryStore;
use crate::migration::run_migrations;
use crate::repositories::{
    PgProfileRepository, PgTaskRepository, PgTicketRepository, PgTodoListRepository,
    PgUserRepository, PgVerificationRepository,
};
use crate::traits::{
    ProfileRepository, TaskRepository, TicketRepository, TodoListRepository, UserRepository,
    VerificationRepository,
};

/// Every repository the services need, behind trait objects.
#[derive(Debug, Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub verifications: Arc<dyn VerificationRepository>,
    pub tickets: Arc<dyn TicketRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub todo_lists: Arc<dyn TodoListRepository>,
    pub tasks: Arc<dyn TaskRepository>,
    pool: Option<DatabasePool>,
}

impl Repositories {
    /// Build the repositories for the configured provider, running
    /// migrations first when asked to.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        match config.provider {
            DatabaseProvider::Postgres => {
                let pool = DatabasePool::connect(config).await?;
                if config.run_migrations {
                    run_migrations(pool.pool()).await?;
                }
                Ok(Self::postgres(pool))
            }
            DatabaseProvider::Memory => {
                info!("Using in-memory repositories; data will not persist");
                Ok(Self::in_memory(MemoryStore::new()))
            }
        }
    }

    /// PostgreSQL repositories sharing one pool.
    pub fn postgres(pool: DatabasePool) -> Self {
        let pg = pool.pool().clone();
        Self {
            users: Arc::new(PgUserRepository::new(pg.clone())),
            verifications: Arc::new(PgVerificationRepository::new(pg.clone())),
            tickets: Arc::new(PgTicketRepository::new(pg.clone())),
            profiles: Arc::new(PgProfileRepository::new(pg.clone())),
            todo_lists: Arc::new(PgTodoListRepository::new(pg.clone())),
            tasks: Arc::new(PgTaskRepository::new(pg)),
            pool: Some(pool),
        }
    }

    /// Repositories backed by one shared [`MemoryStore`].
    pub fn in_memory(store: MemoryStore) -> Self {
        Self {
            users: Arc::new(store.clone()),
            verifications: Arc::new(store.clone()),
            tickets: Arc::new(store.clone()),
            profiles: Arc::new(store.clone()),
            todo_lists: Arc::new(store.clone()),
            tasks: Arc::new(store),
            pool: None,
        }
    }

    /// The PostgreSQL pool, if that backend is in use.
    pub fn pool(&self) -> Option<&DatabasePool> {
        self.pool.as_ref()
    }

    /// Whether the backing store answers.
    pub async fn health_check(&self) -> AppResult<bool> {
        match &self.pool {
            Some(pool) => pool.health_check().await,
            None => Ok(true),
        }
    }

    /// Release pooled connections.
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}
