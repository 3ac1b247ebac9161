//! Todo list and task handlers. These routes are public.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;

use resolution_entity::todo::{Task, TodoListWithTasks};
use resolution_service::todo::{CreateTaskInput, UpdateTaskInput};

use crate::dto::request::{CreateTaskRequest, TaskListQuery, TodoListRequest, UpdateTaskRequest};
use crate::error::ApiResult;
use crate::extractors::{PathId, ValidatedJson, parse_id};
use crate::state::AppState;

/// GET /api/todo-lists
pub async fn lists(State(state): State<AppState>) -> ApiResult<Json<Vec<TodoListWithTasks>>> {
    Ok(Json(state.todo_service.lists().await?))
}

/// POST /api/todo-lists
pub async fn create_list(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<TodoListRequest>,
) -> ApiResult<(StatusCode, Json<TodoListWithTasks>)> {
    let list = state.todo_service.create_list(&req.name).await?;
    Ok((StatusCode::CREATED, Json(list)))
}

/// GET /api/todo-lists/{id}
pub async fn get_list(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> ApiResult<Json<TodoListWithTasks>> {
    Ok(Json(state.todo_service.list(id).await?))
}

/// PATCH /api/todo-lists/{id}
pub async fn rename_list(
    State(state): State<AppState>,
    PathId(id): PathId,
    ValidatedJson(req): ValidatedJson<TodoListRequest>,
) -> ApiResult<Json<TodoListWithTasks>> {
    Ok(Json(state.todo_service.rename_list(id, &req.name).await?))
}

/// DELETE /api/todo-lists/{id}
pub async fn delete_list(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> ApiResult<StatusCode> {
    state.todo_service.delete_list(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/tasks
pub async fn tasks(
    State(state): State<AppState>,
    Query(query): Query<TaskListQuery>,
) -> ApiResult<Json<Vec<Task>>> {
    let list_id = query
        .todo_list_id
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(parse_id)
        .transpose()?;
    Ok(Json(state.todo_service.tasks(list_id).await?))
}

/// POST /api/tasks
pub async fn create_task(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let task = state
        .todo_service
        .create_task(CreateTaskInput {
            todo_list_id: req.todo_list_id,
            title: req.title,
            description: req.description,
            completed: req.completed,
            due_date: req.due_date,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /api/tasks/{id}
pub async fn get_task(State(state): State<AppState>, PathId(id): PathId) -> ApiResult<Json<Task>> {
    Ok(Json(state.todo_service.task(id).await?))
}

/// PATCH /api/tasks/{id}
pub async fn update_task(
    State(state): State<AppState>,
    PathId(id): PathId,
    ValidatedJson(req): ValidatedJson<UpdateTaskRequest>,
) -> ApiResult<Json<Task>> {
    let task = state
        .todo_service
        .update_task(
            id,
            UpdateTaskInput {
                todo_list_id: req.todo_list_id,
                title: req.title,
                description: req.description,
                completed: req.completed,
                due_date: req.due_date,
            },
        )
        .await?;
    Ok(Json(task))
}

/// DELETE /api/tasks/{id}
pub async fn delete_task(State(state): State<AppState>, PathId(id): PathId) -> ApiResult<StatusCode> {
    state.todo_service.delete_task(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
