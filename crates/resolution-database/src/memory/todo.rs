use async_trait::async_trait;
use chrono::Utc;

use resolution_core::AppResult;
use resolution_core::error::AppError;
use resolution_entity::todo::{CreateTask, CreateTodoList, Task, TodoList, UpdateTask};

use super::MemoryStore;
use crate::traits::{TaskRepository, TodoListRepository};

fn missing_list(id: i64) -> AppError {
    AppError::not_found(format!("Todo list {id} does not exist"))
}

#[async_trait]
impl TodoListRepository for MemoryStore {
    async fn find_all(&self) -> AppResult<Vec<TodoList>> {
        Ok(self.tables.read().await.todo_lists.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<TodoList>> {
        Ok(self.tables.read().await.todo_lists.get(&id).cloned())
    }

    async fn create(&self, data: &CreateTodoList) -> AppResult<TodoList> {
        let mut tables = self.tables.write().await;
        let list = TodoList {
            id: tables.next_id("todo_lists"),
            name: data.name.clone(),
            created_at: Utc::now(),
        };
        tables.todo_lists.insert(list.id, list.clone());
        Ok(list)
    }

    async fn rename(&self, id: i64, name: &str) -> AppResult<Option<TodoList>> {
        let mut tables = self.tables.write().await;
        Ok(tables.todo_lists.get_mut(&id).map(|list| {
            list.name = name.to_string();
            list.clone()
        }))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.todo_lists.remove(&id).is_none() {
            return Ok(false);
        }
        tables.tasks.retain(|_, t| t.todo_list_id != id);
        Ok(true)
    }
}

#[async_trait]
impl TaskRepository for MemoryStore {
    async fn find_all(&self, todo_list_id: Option<i64>) -> AppResult<Vec<Task>> {
        let tables = self.tables.read().await;
        Ok(tables
            .tasks
            .values()
            .filter(|t| todo_list_id.is_none_or(|id| t.todo_list_id == id))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Task>> {
        Ok(self.tables.read().await.tasks.get(&id).cloned())
    }

    async fn create(&self, data: &CreateTask) -> AppResult<Task> {
        let mut tables = self.tables.write().await;
        if !tables.todo_lists.contains_key(&data.todo_list_id) {
            return Err(missing_list(data.todo_list_id));
        }
        let task = Task {
            id: tables.next_id("tasks"),
            todo_list_id: data.todo_list_id,
            title: data.title.clone(),
            description: data.description.clone(),
            completed: data.completed,
            due_date: data.due_date,
            created_at: Utc::now(),
        };
        tables.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn update(&self, id: i64, data: &UpdateTask) -> AppResult<Option<Task>> {
        let mut tables = self.tables.write().await;
        if let Some(list_id) = data.todo_list_id {
            if !tables.todo_lists.contains_key(&list_id) {
                return Err(missing_list(list_id));
            }
        }
        Ok(tables.tasks.get_mut(&id).map(|task| {
            if let Some(list_id) = data.todo_list_id {
                task.todo_list_id = list_id;
            }
            if let Some(title) = &data.title {
                task.title = title.clone();
            }
            if let Some(description) = &data.description {
                task.description = description.clone();
            }
            if let Some(completed) = data.completed {
                task.completed = completed;
            }
            if let Some(due_date) = data.due_date {
                task.due_date = due_date;
            }
            task.clone()
        }))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        Ok(self.tables.write().await.tasks.remove(&id).is_some())
    }
}
