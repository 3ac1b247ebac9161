//! Admin user management.

use std::sync::Arc;

use tracing::info;

use resolution_core::AppResult;
use resolution_core::error::AppError;
use resolution_database::UserRepository;
use resolution_entity::user::User;

use super::normalize_email;
use crate::context::RequestContext;

/// Handles administrative user operations.
#[derive(Debug, Clone)]
pub struct AdminUserService {
    users: Arc<dyn UserRepository>,
}

impl AdminUserService {
    /// Creates a new admin user service.
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Lists all users.
    pub async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<User>> {
        ctx.require_admin()?;
        self.users.find_all().await
    }

    /// Deletes a user and everything it owns.
    pub async fn delete(&self, ctx: &RequestContext, id: i64) -> AppResult<()> {
        ctx.require_admin()?;
        if id == ctx.user_id {
            return Err(AppError::validation("You cannot delete your own account"));
        }
        if !self.users.delete(id).await? {
            return Err(AppError::not_found("User not found"));
        }
        info!(user_id = id, deleted_by = ctx.user_id, "User deleted");
        Ok(())
    }

    /// Looks an account up by email, for operator tooling.
    pub async fn find_by_email(&self, email: &str) -> AppResult<User> {
        self.users
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or_else(|| AppError::not_found(format!("No user with email '{email}'")))
    }

    /// Grants or revokes admin rights, for operator tooling.
    pub async fn set_admin(&self, email: &str, is_admin: bool) -> AppResult<User> {
        let user = self.find_by_email(email).await?;
        self.users.set_admin(user.id, is_admin).await?;
        info!(user_id = user.id, is_admin, "Admin flag changed");
        Ok(User { is_admin, ..user })
    }
}
