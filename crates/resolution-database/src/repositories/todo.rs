//! Todo list and task repository implementations.

use async_trait::async_trait;
use sqlx::PgPool;

use resolution_core::result::AppResult;
use resolution_entity::todo::{CreateTask, CreateTodoList, Task, TodoList, UpdateTask};

use crate::error::map_sqlx;
use crate::traits::{TaskRepository, TodoListRepository};

/// PostgreSQL-backed [`TodoListRepository`].
#[derive(Debug, Clone)]
pub struct PgTodoListRepository {
    pool: PgPool,
}

impl PgTodoListRepository {
    /// Create a new todo list repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoListRepository for PgTodoListRepository {
    async fn find_all(&self) -> AppResult<Vec<TodoList>> {
        sqlx::query_as::<_, TodoList>("SELECT * FROM todo_lists ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx("Failed to list todo lists", e))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<TodoList>> {
        sqlx::query_as::<_, TodoList>("SELECT * FROM todo_lists WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx("Failed to find todo list", e))
    }

    async fn create(&self, data: &CreateTodoList) -> AppResult<TodoList> {
        sqlx::query_as::<_, TodoList>("INSERT INTO todo_lists (name) VALUES ($1) RETURNING *")
            .bind(&data.name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx("Failed to create todo list", e))
    }

    async fn rename(&self, id: i64, name: &str) -> AppResult<Option<TodoList>> {
        sqlx::query_as::<_, TodoList>("UPDATE todo_lists SET name = $2 WHERE id = $1 RETURNING *")
            .bind(id)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx("Failed to rename todo list", e))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM todo_lists WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx("Failed to delete todo list", e))?;
        Ok(result.rows_affected() > 0)
    }
}

/// PostgreSQL-backed [`TaskRepository`].
#[derive(Debug, Clone)]
pub struct PgTaskRepository {
    pool: PgPool,
}

impl PgTaskRepository {
    /// Create a new task repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn find_all(&self, todo_list_id: Option<i64>) -> AppResult<Vec<Task>> {
        sqlx::query_as::<_, Task>(
            "SELECT * FROM tasks WHERE ($1::BIGINT IS NULL OR todo_list_id = $1) ORDER BY id ASC",
        )
        .bind(todo_list_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx("Failed to list tasks", e))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Task>> {
        sqlx::query_as::<_, Task>("SELECT * FROM tasks WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx("Failed to find task", e))
    }

    async fn create(&self, data: &CreateTask) -> AppResult<Task> {
        sqlx::query_as::<_, Task>(
            "INSERT INTO tasks (todo_list_id, title, description, completed, due_date) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING *",
        )
        .bind(data.todo_list_id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.completed)
        .bind(data.due_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx("Failed to create task", e))
    }

    async fn update(&self, id: i64, data: &UpdateTask) -> AppResult<Option<Task>> {
        sqlx::query_as::<_, Task>(
            "UPDATE tasks SET \
                todo_list_id = COALESCE($2, todo_list_id), \
                title = COALESCE($3, title), \
                description = COALESCE($4, description), \
                completed = COALESCE($5, completed), \
                due_date = CASE WHEN $6 THEN $7 ELSE due_date END \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(id)
        .bind(data.todo_list_id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.completed)
        .bind(data.due_date.is_some())
        .bind(data.due_date.flatten())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx("Failed to update task", e))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx("Failed to delete task", e))?;
        Ok(result.rows_affected() > 0)
    }
}
