//! Claims and requests.
//!
//! Both resources share one shape and live in separate tables; the
//! [`TicketKind`] selects which.

pub mod kind;
pub mod model;
pub mod status;

pub use kind::TicketKind;
pub use model::{CreateTicket, DailyStatusCount, StatusCount, Ticket, UpdateTicket};
pub use status::TicketStatus;
