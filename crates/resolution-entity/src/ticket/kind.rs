//! Ticket kind enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which ticket table a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketKind {
    /// A complaint.
    Claim,
    /// A service request.
    Request,
}

impl TicketKind {
    /// Backing table name.
    pub fn table(&self) -> &'static str {
        match self {
            Self::Claim => "claims",
            Self::Request => "requests",
        }
    }

    /// Return the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Claim => "claim",
            Self::Request => "request",
        }
    }

    /// Capitalized label for messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Claim => "Claim",
            Self::Request => "Request",
        }
    }
}

impl fmt::Display for TicketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TicketKind {
    type Err = resolution_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "claim" | "claims" => Ok(Self::Claim),
            "request" | "requests" => Ok(Self::Request),
            _ => Err(resolution_core::AppError::validation(format!(
                "Invalid ticket type: '{s}'. Expected one of: claim, request"
            ))),
        }
    }
}
