//! Registration, login and self-service account updates.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use resolution_auth::jwt::JwtEncoder;
use resolution_auth::password::{PasswordHasher, PasswordValidator};
use resolution_core::AppResult;
use resolution_core::error::{AppError, ErrorKind};
use resolution_database::UserRepository;
use resolution_entity::user::{CreateUser, UpdateUser, User};

use super::{normalize_email, normalize_phone};
use crate::context::RequestContext;
use crate::verification::VerificationService;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Data for a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
}

/// Result of a registration.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub user: User,
    /// Seconds until the emailed code expires.
    pub code_expires_in: u64,
    /// False when the mail provider refused the message.
    pub code_sent: bool,
}

/// Partial account update. `phone: Some(None)` removes the phone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<Option<String>>,
}

/// Successful login.
#[derive(Debug, Clone, Serialize)]
pub struct LoginOutcome {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: User,
}

/// Handles account self-service operations.
#[derive(Debug, Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
    encoder: Arc<JwtEncoder>,
    verification: Arc<VerificationService>,
    require_verified_login: bool,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        encoder: Arc<JwtEncoder>,
        verification: Arc<VerificationService>,
        require_verified_login: bool,
    ) -> Self {
        Self {
            users,
            hasher,
            validator,
            encoder,
            verification,
            require_verified_login,
        }
    }

    /// Create an unverified account and email it a verification code.
    pub async fn register(&self, req: RegisterUser) -> AppResult<Registration> {
        let email = normalize_email(&req.email);
        let first_name = req.first_name.trim().to_string();
        let last_name = req.last_name.trim().to_string();

        self.validator
            .validate(&req.password, &[&first_name, &last_name, &email])?;

        let password_hash = self.hasher.hash_password(&req.password)?;
        let user = self
            .users
            .create(&CreateUser {
                first_name,
                last_name,
                email,
                password_hash,
                phone: normalize_phone(req.phone.as_deref()),
            })
            .await?;

        info!(user_id = user.id, email = %user.email, "User registered");

        let code_sent = match self.verification.issue_for(&user).await {
            Ok(_) => true,
            Err(e) if e.kind == ErrorKind::ExternalService => {
                warn!(user_id = user.id, error = %e, "Verification email could not be sent");
                false
            }
            Err(e) => return Err(e),
        };

        Ok(Registration {
            user,
            code_expires_in: self.verification.ttl_seconds(),
            code_sent,
        })
    }

    /// Exchange credentials for a bearer token.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<LoginOutcome> {
        let user = self
            .users
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or_else(|| AppError::unauthorized(INVALID_CREDENTIALS))?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            warn!(user_id = user.id, "Login failed: wrong password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        if self.require_verified_login && !user.verified {
            return Err(AppError::forbidden(
                "Account not verified. Enter the code sent to your email first.",
            ));
        }

        let issued = self.encoder.issue(user.id, &user.email, user.is_admin)?;
        info!(user_id = user.id, "User logged in");

        Ok(LoginOutcome {
            token: issued.token,
            expires_at: issued.expires_at,
            user,
        })
    }

    /// The caller's own account.
    pub async fn me(&self, ctx: &RequestContext) -> AppResult<User> {
        self.users
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Any account the caller may see: itself, or anyone for admins.
    pub async fn get(&self, ctx: &RequestContext, id: i64) -> AppResult<User> {
        ctx.require_access(id)?;
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Update fields of an existing account in place.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: i64,
        req: UpdateUserInput,
    ) -> AppResult<User> {
        ctx.require_access(id)?;

        let password_hash = match &req.password {
            Some(password) => {
                self.validator.validate(password, &[])?;
                Some(self.hasher.hash_password(password)?)
            }
            None => None,
        };

        let update = UpdateUser {
            first_name: req.first_name.map(|s| s.trim().to_string()),
            last_name: req.last_name.map(|s| s.trim().to_string()),
            email: req.email.as_deref().map(normalize_email),
            password_hash,
            phone: req.phone.map(|p| normalize_phone(p.as_deref())),
        };

        if update.is_empty() {
            return Err(AppError::validation("No fields to update"));
        }

        let user = self
            .users
            .update(id, &update)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        info!(user_id = id, updated_by = ctx.user_id, "User updated");
        Ok(user)
    }
}
