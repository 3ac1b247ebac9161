//! Account handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use resolution_entity::user::User;
use resolution_service::user::{RegisterUser, UpdateUserInput};

use crate::dto::request::{RegisterRequest, UpdateUserRequest};
use crate::dto::response::{MessageResponse, RegistrationResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, PathId, ValidatedJson};
use crate::state::AppState;

/// POST /api/user
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<RegistrationResponse>)> {
    let registration = state
        .user_service
        .register(RegisterUser {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            password: req.password,
            phone: req.phone,
        })
        .await?;

    let message = if registration.code_sent {
        "User registered. A verification code was sent to your email."
    } else {
        "User registered, but the verification email could not be sent. Request a new code."
    };

    Ok((
        StatusCode::CREATED,
        Json(RegistrationResponse {
            message: message.to_string(),
            user: registration.user,
            token_expires_in: registration.code_expires_in,
            code_sent: registration.code_sent,
        }),
    ))
}

/// GET /api/user
pub async fn list(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<Vec<User>>> {
    Ok(Json(state.admin_user_service.list(&auth).await?))
}

/// GET /api/user/me
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<User>> {
    Ok(Json(state.user_service.me(&auth).await?))
}

/// GET /api/user/{id}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    PathId(id): PathId,
) -> ApiResult<Json<User>> {
    Ok(Json(state.user_service.get(&auth, id).await?))
}

/// PUT|PATCH /api/user/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    PathId(id): PathId,
    ValidatedJson(req): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<User>> {
    req.check_phone()?;

    let user = state
        .user_service
        .update(
            &auth,
            id,
            UpdateUserInput {
                first_name: req.first_name,
                last_name: req.last_name,
                email: req.email,
                password: req.password,
                phone: req.phone,
            },
        )
        .await?;

    Ok(Json(user))
}

/// DELETE /api/user/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    PathId(id): PathId,
) -> ApiResult<Json<MessageResponse>> {
    state.admin_user_service.delete(&auth, id).await?;
    Ok(Json(MessageResponse::new("User deleted")))
}
