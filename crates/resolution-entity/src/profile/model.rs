//! Profile entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Public-facing contact card of a user. One per user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub id: i64,
    /// Owning user.
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    /// Contact email, may differ from the login email.
    pub email: String,
    pub phone: Option<String>,
    /// Reference to the photo (URL or path); uploads are not handled here.
    pub photo: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full replacement of a user's profile, created if missing.
#[derive(Debug, Clone)]
pub struct UpsertProfile {
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub photo: String,
}

/// Partial profile update.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<Option<String>>,
    pub photo: Option<String>,
}
