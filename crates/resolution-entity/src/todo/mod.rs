//! Todo lists and their tasks.

pub mod list;
pub mod task;

pub use list::{CreateTodoList, TodoList, TodoListWithTasks};
pub use task::{CreateTask, Task, UpdateTask};
