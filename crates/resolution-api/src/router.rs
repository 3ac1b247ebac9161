//! Route definitions for the Resolution HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.

use axum::routing::{get, patch, post, put};
use axum::{Extension, Router};

use resolution_entity::ticket::TicketKind;

use crate::handlers;
use crate::state::AppState;

/// Build the Axum router with every route, bound to `state`.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(health_routes())
        .merge(user_routes())
        .merge(auth_routes())
        .merge(ticket_routes(TicketKind::Claim))
        .merge(ticket_routes(TicketKind::Request))
        .merge(profile_routes())
        .merge(admin_routes())
        .merge(todo_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Liveness and readiness
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/ready", get(handlers::health::ready))
}

/// Registration, login and account management
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::auth::login))
        .route(
            "/user",
            get(handlers::user::list).post(handlers::user::register),
        )
        .route("/user/me", get(handlers::user::me))
        .route(
            "/user/{id}",
            get(handlers::user::get)
                .put(handlers::user::update)
                .patch(handlers::user::update)
                .delete(handlers::user::delete),
        )
}

/// Verification codes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/auth",
            get(handlers::verification::list)
                .post(handlers::verification::issue)
                .put(handlers::verification::reissue),
        )
        .route(
            "/auth/{id}",
            put(handlers::verification::regenerate).delete(handlers::verification::delete),
        )
        .route("/auth/verify", post(handlers::auth::verify))
        .route("/auth/resend", post(handlers::auth::resend))
}

/// Claims or requests, depending on `kind`
fn ticket_routes(kind: TicketKind) -> Router<AppState> {
    let base = format!("/{}", kind.as_str());

    Router::new()
        .route(
            &base,
            get(handlers::ticket::list).post(handlers::ticket::create),
        )
        .route(
            &format!("{base}/user/{{user_id}}"),
            get(handlers::ticket::list_for_user),
        )
        .route(
            &format!("{base}/{{id}}"),
            get(handlers::ticket::get)
                .patch(handlers::ticket::update)
                .delete(handlers::ticket::delete),
        )
        .layer(Extension(kind))
}

/// Profiles
fn profile_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/profile",
            get(handlers::profile::mine).put(handlers::profile::upsert),
        )
        .route("/profile/user/{user_id}", get(handlers::profile::for_user))
        .route("/profile/{id}", patch(handlers::profile::update))
}

/// Admin panel and reports
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/admin",
            get(handlers::admin::overview).patch(handlers::admin::set_status),
        )
        .route("/reports", get(handlers::report::reports))
}

/// Todo lists and tasks
fn todo_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/todo-lists",
            get(handlers::todo::lists).post(handlers::todo::create_list),
        )
        .route(
            "/todo-lists/{id}",
            get(handlers::todo::get_list)
                .patch(handlers::todo::rename_list)
                .delete(handlers::todo::delete_list),
        )
        .route(
            "/tasks",
            get(handlers::todo::tasks).post(handlers::todo::create_task),
        )
        .route(
            "/tasks/{id}",
            get(handlers::todo::get_task)
                .patch(handlers::todo::update_task)
                .delete(handlers::todo::delete_task),
        )
}
