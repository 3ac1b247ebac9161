//! # resolution-database
//!
//! Repository traits for every Resolution entity, with a PostgreSQL
//! implementation over sqlx and a process-local implementation used for
//! development and tests.

pub mod connection;
pub mod error;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod traits;

mod registry;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use registry::Repositories;
pub use traits::{
    ProfileRepository, TaskRepository, TicketRepository, TodoListRepository, UserRepository,
    VerificationRepository,
};
