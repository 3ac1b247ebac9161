//! Admin panel handlers.

use axum::Json;
use axum::extract::State;

use resolution_entity::ticket::Ticket;
use resolution_service::admin::AdminOverview;

use crate::dto::request::AdminStatusRequest;
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/admin
pub async fn overview(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<AdminOverview>> {
    Ok(Json(state.admin_panel_service.overview(&auth).await?))
}

/// PATCH /api/admin
pub async fn set_status(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<AdminStatusRequest>,
) -> ApiResult<Json<Ticket>> {
    let ticket = state
        .admin_panel_service
        .set_status(&auth, req.kind, req.id, req.status)
        .await?;
    Ok(Json(ticket))
}
