//! One profile per user, seeded from the account when fields are omitted.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use resolution_core::AppResult;
use resolution_core::error::AppError;
use resolution_database::{ProfileRepository, UserRepository};
use resolution_entity::profile::{Profile, UpdateProfile, UpsertProfile};

use crate::context::RequestContext;
use crate::user::{normalize_email, normalize_phone};

/// Full profile write. Omitted fields keep their current value, or take
/// the account's value when the profile does not exist yet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpsertProfileInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub photo: Option<String>,
}

/// Partial profile update. `phone: Some(None)` removes the phone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<Option<String>>,
    pub photo: Option<String>,
}

/// Profile operations.
#[derive(Debug, Clone)]
pub struct ProfileService {
    profiles: Arc<dyn ProfileRepository>,
    users: Arc<dyn UserRepository>,
}

impl ProfileService {
    /// Creates a new profile service.
    pub fn new(profiles: Arc<dyn ProfileRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { profiles, users }
    }

    /// The caller's profile.
    pub async fn mine(&self, ctx: &RequestContext) -> AppResult<Profile> {
        self.profiles
            .find_by_user(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Profile not found"))
    }

    /// Create or replace the caller's profile. The flag is true when the
    /// profile did not exist before.
    pub async fn upsert(
        &self,
        ctx: &RequestContext,
        req: UpsertProfileInput,
    ) -> AppResult<(Profile, bool)> {
        let user = self
            .users
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;
        let existing = self.profiles.find_by_user(user.id).await?;

        let trimmed = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        let data = match &existing {
            Some(current) => UpsertProfile {
                user_id: user.id,
                first_name: trimmed(req.first_name).unwrap_or_else(|| current.first_name.clone()),
                last_name: trimmed(req.last_name).unwrap_or_else(|| current.last_name.clone()),
                email: req
                    .email
                    .as_deref()
                    .map(normalize_email)
                    .unwrap_or_else(|| current.email.clone()),
                phone: normalize_phone(req.phone.as_deref()).or_else(|| current.phone.clone()),
                photo: req.photo.unwrap_or_else(|| current.photo.clone()),
            },
            None => UpsertProfile {
                user_id: user.id,
                first_name: trimmed(req.first_name).unwrap_or(user.first_name),
                last_name: trimmed(req.last_name).unwrap_or(user.last_name),
                email: req
                    .email
                    .as_deref()
                    .map(normalize_email)
                    .unwrap_or(user.email),
                phone: normalize_phone(req.phone.as_deref()).or(user.phone),
                photo: req.photo.unwrap_or_default(),
            },
        };

        let profile = self.profiles.upsert(&data).await?;
        let created = existing.is_none();
        info!(user_id = ctx.user_id, profile_id = profile.id, created, "Profile saved");
        Ok((profile, created))
    }

    /// Profile of a user; the user itself or an admin.
    pub async fn for_user(&self, ctx: &RequestContext, user_id: i64) -> AppResult<Profile> {
        ctx.require_access(user_id)?;
        self.profiles
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Profile not found"))
    }

    /// Partial update by profile id; owner or admin.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: i64,
        req: UpdateProfileInput,
    ) -> AppResult<Profile> {
        self.profiles
            .find_by_id(id)
            .await?
            .filter(|p| ctx.can_access(p.user_id))
            .ok_or_else(|| AppError::not_found("Profile not found"))?;

        let update = UpdateProfile {
            first_name: req.first_name.map(|s| s.trim().to_string()),
            last_name: req.last_name.map(|s| s.trim().to_string()),
            email: req.email.as_deref().map(normalize_email),
            phone: req.phone.map(|p| normalize_phone(p.as_deref())),
            photo: req.photo,
        };

        let profile = self
            .profiles
            .update(id, &update)
            .await?
            .ok_or_else(|| AppError::not_found("Profile not found"))?;

        info!(profile_id = id, updated_by = ctx.user_id, "Profile updated");
        Ok(profile)
    }
}
