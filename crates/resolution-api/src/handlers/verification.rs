//! Verification code record handlers under `/api/auth`.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::Value;

use resolution_entity::verification::VerificationCode;

use crate::dto::request::user_ref_from_body;
use crate::dto::response::{DataResponse, MessageResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, PathId};
use crate::state::AppState;

type CodeResponse = (StatusCode, Json<DataResponse<VerificationCode>>);

/// POST /api/auth
pub async fn issue(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<Value>,
) -> ApiResult<CodeResponse> {
    let user_id = user_ref_from_body(&body)?;
    let issued = state.verification_service.issue(&auth, user_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new("Verification code sent", issued.record)),
    ))
}

/// PUT /api/auth
pub async fn reissue(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<Value>,
) -> ApiResult<CodeResponse> {
    let user_id = user_ref_from_body(&body)?;
    let issued = state.verification_service.issue(&auth, user_id).await?;

    let response = if issued.replaced {
        (
            StatusCode::OK,
            DataResponse::new("Verification code updated and sent", issued.record),
        )
    } else {
        (
            StatusCode::CREATED,
            DataResponse::new("Verification code created and sent", issued.record),
        )
    };
    Ok((response.0, Json(response.1)))
}

/// PUT /api/auth/{id}
pub async fn regenerate(
    State(state): State<AppState>,
    auth: AuthUser,
    PathId(id): PathId,
) -> ApiResult<Json<DataResponse<VerificationCode>>> {
    let record = state.verification_service.regenerate(&auth, id).await?;
    Ok(Json(DataResponse::new(
        "Verification code updated and sent",
        record,
    )))
}

/// GET /api/auth
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<VerificationCode>>> {
    Ok(Json(state.verification_service.list(&auth).await?))
}

/// DELETE /api/auth/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    PathId(id): PathId,
) -> ApiResult<Json<MessageResponse>> {
    state.verification_service.delete(&auth, id).await?;
    Ok(Json(MessageResponse::new("Verification record deleted")))
}
