//! Claim and request workflows.

pub mod service;

pub use service::{CreateTicketInput, TicketService, UpdateTicketInput};
