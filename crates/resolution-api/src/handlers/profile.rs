//! Profile handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use resolution_entity::profile::Profile;
use resolution_service::profile::{UpdateProfileInput, UpsertProfileInput};

use crate::dto::request::{UpdateProfileRequest, UpsertProfileRequest};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, PathId, ValidatedJson};
use crate::state::AppState;

/// GET /api/profile
pub async fn mine(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<Profile>> {
    Ok(Json(state.profile_service.mine(&auth).await?))
}

/// PUT /api/profile
pub async fn upsert(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<UpsertProfileRequest>,
) -> ApiResult<(StatusCode, Json<Profile>)> {
    let (profile, created) = state
        .profile_service
        .upsert(
            &auth,
            UpsertProfileInput {
                first_name: req.first_name,
                last_name: req.last_name,
                email: req.email,
                phone: req.phone,
                photo: req.photo,
            },
        )
        .await?;

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(profile)))
}

/// GET /api/profile/user/{user_id}
pub async fn for_user(
    State(state): State<AppState>,
    auth: AuthUser,
    PathId(user_id): PathId,
) -> ApiResult<Json<Profile>> {
    Ok(Json(state.profile_service.for_user(&auth, user_id).await?))
}

/// PATCH /api/profile/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    PathId(id): PathId,
    ValidatedJson(req): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<Profile>> {
    req.check_phone()?;

    let profile = state
        .profile_service
        .update(
            &auth,
            id,
            UpdateProfileInput {
                first_name: req.first_name,
                last_name: req.last_name,
                email: req.email,
                phone: req.phone,
                photo: req.photo,
            },
        )
        .await?;

    Ok(Json(profile))
}
