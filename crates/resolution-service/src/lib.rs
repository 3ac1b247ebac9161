//! # resolution-service
//!
//! Business logic for Resolution. Each service orchestrates repositories,
//! credential primitives and the mailer to implement one use case family.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod admin;
pub mod context;
pub mod mail;
pub mod profile;
pub mod report;
pub mod ticket;
pub mod todo;
pub mod user;
pub mod verification;

pub use admin::AdminPanelService;
pub use context::RequestContext;
pub use mail::{HttpMailer, LogMailer, MailMessage, Mailer};
pub use profile::ProfileService;
pub use report::ReportService;
pub use ticket::TicketService;
pub use todo::TodoService;
pub use user::{AdminUserService, UserService};
pub use verification::VerificationService;
