//! Ticket entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::status::TicketStatus;

/// A claim or request row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Ticket {
    /// Record identifier, unique within its table.
    pub id: i64,
    /// Submitting user.
    pub user_id: i64,
    /// Short summary.
    pub subject: String,
    /// Free text body.
    pub description: String,
    /// Processing state.
    pub status: TicketStatus,
    /// When the ticket was submitted.
    pub created_at: DateTime<Utc>,
    /// When the ticket last changed.
    pub updated_at: DateTime<Utc>,
}

impl Ticket {
    /// Whether the given actor may see or edit this ticket.
    pub fn is_accessible_by(&self, actor_id: i64, actor_is_admin: bool) -> bool {
        actor_is_admin || self.user_id == actor_id
    }
}

/// Data required to create a ticket.
#[derive(Debug, Clone)]
pub struct CreateTicket {
    pub user_id: i64,
    pub subject: String,
    pub description: String,
    pub status: TicketStatus,
}

/// Partial ticket update.
#[derive(Debug, Clone, Default)]
pub struct UpdateTicket {
    pub subject: Option<String>,
    pub description: Option<String>,
    pub status: Option<TicketStatus>,
}

/// Number of tickets per status created on one UTC day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct DailyStatusCount {
    pub day: chrono::NaiveDate,
    pub status: TicketStatus,
    pub count: i64,
}

/// Number of tickets in one status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct StatusCount {
    pub status: TicketStatus,
    pub count: i64,
}
