//! Todo list and task operations. These endpoints are public.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use resolution_core::AppResult;
use resolution_core::error::AppError;
use resolution_database::{TaskRepository, TodoListRepository};
use resolution_entity::todo::{
    CreateTask, CreateTodoList, Task, TodoList, TodoListWithTasks, UpdateTask,
};

/// Data for a new task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTaskInput {
    pub todo_list_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub due_date: Option<NaiveDate>,
}

/// Partial task update. `due_date: Some(None)` clears the date.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTaskInput {
    pub todo_list_id: Option<i64>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub due_date: Option<Option<NaiveDate>>,
}

/// Todo list and task operations.
#[derive(Debug, Clone)]
pub struct TodoService {
    lists: Arc<dyn TodoListRepository>,
    tasks: Arc<dyn TaskRepository>,
}

impl TodoService {
    /// Creates a new todo service.
    pub fn new(lists: Arc<dyn TodoListRepository>, tasks: Arc<dyn TaskRepository>) -> Self {
        Self { lists, tasks }
    }

    /// Every list with its tasks.
    pub async fn lists(&self) -> AppResult<Vec<TodoListWithTasks>> {
        let lists = self.lists.find_all().await?;
        let mut tasks = self.tasks.find_all(None).await?;

        Ok(lists
            .into_iter()
            .map(|list| {
                let (own, rest): (Vec<Task>, Vec<Task>) =
                    tasks.drain(..).partition(|t| t.todo_list_id == list.id);
                tasks = rest;
                TodoListWithTasks { list, tasks: own }
            })
            .collect())
    }

    /// One list with its tasks.
    pub async fn list(&self, id: i64) -> AppResult<TodoListWithTasks> {
        let list = self.find_list(id).await?;
        let tasks = self.tasks.find_all(Some(id)).await?;
        Ok(TodoListWithTasks { list, tasks })
    }

    pub async fn create_list(&self, name: &str) -> AppResult<TodoListWithTasks> {
        let list = self
            .lists
            .create(&CreateTodoList {
                name: non_blank(name, "Name")?,
            })
            .await?;
        info!(list_id = list.id, "Todo list created");
        Ok(TodoListWithTasks {
            list,
            tasks: Vec::new(),
        })
    }

    pub async fn rename_list(&self, id: i64, name: &str) -> AppResult<TodoListWithTasks> {
        let name = non_blank(name, "Name")?;
        self.lists
            .rename(id, &name)
            .await?
            .ok_or_else(|| list_not_found(id))?;
        self.list(id).await
    }

    /// Delete a list together with its tasks.
    pub async fn delete_list(&self, id: i64) -> AppResult<()> {
        if !self.lists.delete(id).await? {
            return Err(list_not_found(id));
        }
        info!(list_id = id, "Todo list deleted");
        Ok(())
    }

    /// Tasks, optionally restricted to one list.
    pub async fn tasks(&self, todo_list_id: Option<i64>) -> AppResult<Vec<Task>> {
        self.tasks.find_all(todo_list_id).await
    }

    pub async fn task(&self, id: i64) -> AppResult<Task> {
        self.tasks
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Task {id} not found")))
    }

    pub async fn create_task(&self, req: CreateTaskInput) -> AppResult<Task> {
        self.find_list(req.todo_list_id).await?;
        let task = self
            .tasks
            .create(&CreateTask {
                todo_list_id: req.todo_list_id,
                title: non_blank(&req.title, "Title")?,
                description: req.description.unwrap_or_default(),
                completed: req.completed.unwrap_or(false),
                due_date: req.due_date,
            })
            .await?;
        info!(task_id = task.id, list_id = task.todo_list_id, "Task created");
        Ok(task)
    }

    pub async fn update_task(&self, id: i64, req: UpdateTaskInput) -> AppResult<Task> {
        if let Some(list_id) = req.todo_list_id {
            self.find_list(list_id).await?;
        }
        let title = match req.title.as_deref() {
            Some(title) => Some(non_blank(title, "Title")?),
            None => None,
        };

        self.tasks
            .update(
                id,
                &UpdateTask {
                    todo_list_id: req.todo_list_id,
                    title,
                    description: req.description,
                    completed: req.completed,
                    due_date: req.due_date,
                },
            )
            .await?
            .ok_or_else(|| AppError::not_found(format!("Task {id} not found")))
    }

    pub async fn delete_task(&self, id: i64) -> AppResult<()> {
        if !self.tasks.delete(id).await? {
            return Err(AppError::not_found(format!("Task {id} not found")));
        }
        Ok(())
    }

    async fn find_list(&self, id: i64) -> AppResult<TodoList> {
        self.lists
            .find_by_id(id)
            .await?
            .ok_or_else(|| list_not_found(id))
    }
}

fn list_not_found(id: i64) -> AppError {
    AppError::not_found(format!("Todo list {id} not found"))
}

fn non_blank(value: &str, field: &str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("{field} cannot be empty")));
    }
    Ok(trimmed.to_string())
}
