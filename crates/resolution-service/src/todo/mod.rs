//! Todo lists and tasks.

pub mod service;

pub use service::{CreateTaskInput, TodoService, UpdateTaskInput};
