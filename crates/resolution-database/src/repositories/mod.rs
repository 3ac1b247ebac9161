//! PostgreSQL repository implementations.

pub mod profile;
pub mod ticket;
pub mod todo;
pub mod user;
pub mod verification;

pub use profile::PgProfileRepository;
pub use ticket::PgTicketRepository;
pub use todo::{PgTaskRepository, PgTodoListRepository};
pub use user::PgUserRepository;
pub use verification::PgVerificationRepository;
