//! Report handlers.

use axum::Json;
use axum::extract::State;

use resolution_service::report::Report;

use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/reports
pub async fn reports(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<Report>> {
    Ok(Json(state.report_service.generate(&auth).await?))
}
