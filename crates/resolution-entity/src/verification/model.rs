//! Verification code entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A one-time code emailed to a user. At most one exists per user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct VerificationCode {
    /// Record identifier.
    pub id: i64,
    /// Owning user.
    pub user_id: i64,
    /// Six ASCII digits. Never serialized.
    #[serde(skip_serializing)]
    pub code: String,
    /// When the code was issued.
    pub created_at: DateTime<Utc>,
    /// When the code stops being accepted.
    pub expires_at: DateTime<Utc>,
}

impl VerificationCode {
    /// Whether the code is past its expiry at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Whether the code has expired.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Data required to persist a fresh code.
#[derive(Debug, Clone)]
pub struct CreateVerificationCode {
    pub user_id: i64,
    pub code: String,
    pub expires_at: DateTime<Utc>,
}
