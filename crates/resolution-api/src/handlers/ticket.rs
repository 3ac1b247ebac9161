//! Claim and request handlers.
//!
//! The same handlers serve both `/api/claim` and `/api/request`; the
//! router attaches the [`TicketKind`] as an extension.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};

use resolution_entity::ticket::{Ticket, TicketKind};
use resolution_service::ticket::{CreateTicketInput, UpdateTicketInput};

use crate::dto::request::{
    CreateTicketRequest, TicketListQuery, UpdateTicketRequest, parse_user_ref,
};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, PathId, ValidatedJson};
use crate::state::AppState;

/// POST /api/{kind}
pub async fn create(
    State(state): State<AppState>,
    Extension(kind): Extension<TicketKind>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateTicketRequest>,
) -> ApiResult<(StatusCode, Json<Ticket>)> {
    let user = req.user.as_ref().map(parse_user_ref).transpose()?;

    let ticket = state
        .tickets(kind)
        .create(
            &auth,
            CreateTicketInput {
                subject: req.subject,
                description: req.description,
                status: req.status,
                user,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ticket)))
}

/// GET /api/{kind}
pub async fn list(
    State(state): State<AppState>,
    Extension(kind): Extension<TicketKind>,
    auth: AuthUser,
    Query(query): Query<TicketListQuery>,
) -> ApiResult<Json<Vec<Ticket>>> {
    let status = query.status()?;
    Ok(Json(state.tickets(kind).list(&auth, status).await?))
}

/// GET /api/{kind}/user/{user_id}
pub async fn list_for_user(
    State(state): State<AppState>,
    Extension(kind): Extension<TicketKind>,
    auth: AuthUser,
    PathId(user_id): PathId,
    Query(query): Query<TicketListQuery>,
) -> ApiResult<Json<Vec<Ticket>>> {
    let status = query.status()?;
    Ok(Json(
        state
            .tickets(kind)
            .list_for_user(&auth, user_id, status)
            .await?,
    ))
}

/// GET /api/{kind}/{id}
pub async fn get(
    State(state): State<AppState>,
    Extension(kind): Extension<TicketKind>,
    auth: AuthUser,
    PathId(id): PathId,
) -> ApiResult<Json<Ticket>> {
    Ok(Json(state.tickets(kind).get(&auth, id).await?))
}

/// PATCH /api/{kind}/{id}
pub async fn update(
    State(state): State<AppState>,
    Extension(kind): Extension<TicketKind>,
    auth: AuthUser,
    PathId(id): PathId,
    ValidatedJson(req): ValidatedJson<UpdateTicketRequest>,
) -> ApiResult<Json<Ticket>> {
    let ticket = state
        .tickets(kind)
        .update(
            &auth,
            id,
            UpdateTicketInput {
                subject: req.subject,
                description: req.description,
                status: req.status,
            },
        )
        .await?;

    Ok(Json(ticket))
}

/// DELETE /api/{kind}/{id}
pub async fn delete(
    State(state): State<AppState>,
    Extension(kind): Extension<TicketKind>,
    auth: AuthUser,
    PathId(id): PathId,
) -> ApiResult<StatusCode> {
    state.tickets(kind).delete(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
