//! Task entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A single item in a todo list.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: i64,
    /// Owning list; deleting the list deletes its tasks.
    pub todo_list_id: i64,
    pub title: String,
    /// May be empty.
    pub description: String,
    pub completed: bool,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Open and past its due date at `today`.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.completed && self.due_date.is_some_and(|due| due < today)
    }
}

/// Data required to create a task.
#[derive(Debug, Clone)]
pub struct CreateTask {
    pub todo_list_id: i64,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub due_date: Option<NaiveDate>,
}

/// Partial task update. `due_date: Some(None)` clears the date.
#[derive(Debug, Clone, Default)]
pub struct UpdateTask {
    pub todo_list_id: Option<i64>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub due_date: Option<Option<NaiveDate>>,
}
