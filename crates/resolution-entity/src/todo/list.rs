//! Todo list entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::task::Task;

/// A named list of tasks.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TodoList {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// A list together with its tasks, as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoListWithTasks {
    #[serde(flatten)]
    pub list: TodoList,
    pub tasks: Vec<Task>,
}

/// Data required to create a list.
#[derive(Debug, Clone)]
pub struct CreateTodoList {
    pub name: String,
}
