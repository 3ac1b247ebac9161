//! Ticket status enumeration.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Processing state of a claim or request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, sqlx::Type)]
#[sqlx(type_name = "ticket_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    /// Submitted, not yet looked at.
    #[default]
    Pending,
    /// Being worked on.
    InProgress,
    /// Resolved.
    Completed,
}

impl TicketStatus {
    /// Return the status as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = resolution_core::AppError;

    /// Accepts the canonical names plus the Spanish labels older clients send.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" | "pendiente" => Ok(Self::Pending),
            "in_progress" | "in progress" | "en proceso" => Ok(Self::InProgress),
            "completed" | "completado" => Ok(Self::Completed),
            _ => Err(resolution_core::AppError::validation(format!(
                "Invalid status: '{s}'. Expected one of: pending, in_progress, completed"
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for TicketStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(|e: resolution_core::AppError| {
            serde::de::Error::custom(e.message)
        })
    }
}
