//! Login and account verification handlers.

use axum::Json;
use axum::extract::State;

use resolution_entity::user::User;
use resolution_entity::verification::VerificationCode;

use crate::dto::request::{LoginRequest, ResendRequest, VerifyRequest};
use crate::dto::response::{DataResponse, LoginResponse};
use crate::error::ApiResult;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let outcome = state.user_service.login(&req.email, &req.password).await?;

    Ok(Json(LoginResponse {
        token: outcome.token,
        token_type: "Bearer",
        expires_at: outcome.expires_at,
        user: outcome.user,
    }))
}

/// POST /api/auth/verify
pub async fn verify(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<VerifyRequest>,
) -> ApiResult<Json<DataResponse<User>>> {
    let user = state
        .verification_service
        .verify(&req.email, &req.code)
        .await?;

    Ok(Json(DataResponse::new("Account verified", user)))
}

/// POST /api/auth/resend
pub async fn resend(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ResendRequest>,
) -> ApiResult<Json<DataResponse<VerificationCode>>> {
    let issued = state.verification_service.resend(&req.email).await?;

    Ok(Json(DataResponse::new(
        "Verification code sent",
        issued.record,
    )))
}
