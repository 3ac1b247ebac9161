//! Request context carrying the authenticated user.

use serde::{Deserialize, Serialize};

use resolution_core::error::AppError;

/// Context for the current authenticated request.
///
/// Built from the bearer token and passed into service methods so that
/// every operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: i64,
    /// Login email from the token.
    pub email: String,
    /// Admin flag from the token.
    pub is_admin: bool,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: i64, email: impl Into<String>, is_admin: bool) -> Self {
        Self {
            user_id,
            email: email.into(),
            is_admin,
        }
    }

    /// Fails with `Authorization` unless the caller is an admin.
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin {
            Ok(())
        } else {
            Err(AppError::forbidden("Administrator privileges required"))
        }
    }

    /// Whether the caller may act on data owned by `owner_id`.
    pub fn can_access(&self, owner_id: i64) -> bool {
        self.is_admin || self.user_id == owner_id
    }

    /// Fails with `Authorization` unless [`can_access`](Self::can_access).
    pub fn require_access(&self, owner_id: i64) -> Result<(), AppError> {
        if self.can_access(owner_id) {
            Ok(())
        } else {
            Err(AppError::forbidden(
                "You do not have permission to access this resource",
            ))
        }
    }
}
