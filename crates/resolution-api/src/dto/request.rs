//! Request DTOs with validation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use resolution_core::error::AppError;
use resolution_entity::ticket::{TicketKind, TicketStatus};

use super::double_option;

pub const MAX_PHONE_LENGTH: usize = 15;

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 50, message = "First name must be 1-50 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 50, message = "Last name must be 1-50 characters"))]
    pub last_name: String,
    #[validate(
        email(message = "Invalid email address"),
        length(max = 50, message = "Email must be at most 50 characters")
    )]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    #[validate(length(max = 15, message = "Phone must be at most 15 characters"))]
    pub phone: Option<String>,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Partial account update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 50))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub last_name: Option<String>,
    #[validate(email(message = "Invalid email address"), length(max = 50))]
    pub email: Option<String>,
    #[validate(length(min = 1))]
    pub password: Option<String>,
    /// `null` clears the phone number.
    #[serde(default, deserialize_with = "double_option")]
    pub phone: Option<Option<String>>,
}

impl UpdateUserRequest {
    /// Checks the rules `validator` cannot express on a nullable field.
    pub fn check_phone(&self) -> Result<(), AppError> {
        check_phone(self.phone.as_ref().and_then(Option::as_deref))
    }
}

/// Code submission.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Code is required"))]
    pub code: String,
}

/// Ask for a new code.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResendRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
}

/// Extracts the `user` reference from a verification request body.
///
/// Accepts an object or a one-element array of objects, and a user id
/// given either as a number or as a numeric string.
pub fn user_ref_from_body(body: &Value) -> Result<i64, AppError> {
    let object = match body {
        Value::Array(items) => items.first(),
        other => Some(other),
    };
    let user = object
        .and_then(|o| o.get("user"))
        .ok_or_else(|| AppError::validation("The 'user' field is required"))?;
    parse_user_ref(user)
}

/// A user id given as a JSON number or a numeric string.
pub fn parse_user_ref(value: &Value) -> Result<i64, AppError> {
    let invalid = || AppError::validation("Invalid user id. It must be a number.");
    match value {
        Value::Number(n) => n.as_i64().ok_or_else(invalid),
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

/// New claim or request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTicketRequest {
    #[validate(length(min = 1, max = 500, message = "Subject must be 1-500 characters"))]
    pub subject: String,
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,
    pub status: Option<TicketStatus>,
    /// Owner, for admins filing on behalf of someone else.
    pub user: Option<Value>,
}

/// Partial ticket update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateTicketRequest {
    #[validate(length(min = 1, max = 500))]
    pub subject: Option<String>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    pub status: Option<TicketStatus>,
}

/// Status filter for ticket listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TicketListQuery {
    pub status: Option<String>,
}

impl TicketListQuery {
    /// The parsed filter, if one was given.
    pub fn status(&self) -> Result<Option<TicketStatus>, AppError> {
        self.status
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(str::parse)
            .transpose()
    }
}

/// Create-or-replace of the caller's profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpsertProfileRequest {
    #[validate(length(min = 1, max = 50))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub last_name: Option<String>,
    #[validate(email(message = "Invalid email address"), length(max = 50))]
    pub email: Option<String>,
    #[validate(length(max = 15))]
    pub phone: Option<String>,
    #[validate(length(max = 255))]
    pub photo: Option<String>,
}

/// Partial profile update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 50))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub last_name: Option<String>,
    #[validate(email(message = "Invalid email address"), length(max = 50))]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub phone: Option<Option<String>>,
    #[validate(length(max = 255))]
    pub photo: Option<String>,
}

impl UpdateProfileRequest {
    pub fn check_phone(&self) -> Result<(), AppError> {
        check_phone(self.phone.as_ref().and_then(Option::as_deref))
    }
}

/// Admin status change.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AdminStatusRequest {
    #[serde(rename = "type")]
    pub kind: TicketKind,
    #[validate(range(min = 1))]
    pub id: i64,
    pub status: TicketStatus,
}

/// New or renamed todo list.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TodoListRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,
}

/// New task.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTaskRequest {
    pub todo_list_id: i64,
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub due_date: Option<NaiveDate>,
}

/// Partial task update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    pub todo_list_id: Option<i64>,
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    /// `null` clears the due date.
    #[serde(default, deserialize_with = "double_option")]
    pub due_date: Option<Option<NaiveDate>>,
}

/// List filter for tasks.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskListQuery {
    pub todo_list_id: Option<String>,
}

fn check_phone(phone: Option<&str>) -> Result<(), AppError> {
    match phone {
        Some(p) if p.trim().chars().count() > MAX_PHONE_LENGTH => Err(AppError::validation(
            format!("Phone must be at most {MAX_PHONE_LENGTH} characters"),
        )),
        _ => Ok(()),
    }
}
