//! Repository traits.
//!
//! Services depend on these traits only, so the backing store can be
//! PostgreSQL or the in-memory tables without the callers noticing.
//! Every method returns [`AppResult`]; unique violations surface as
//! `Conflict`, missing foreign keys as `NotFound`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use resolution_core::AppResult;
use resolution_entity::profile::{Profile, UpdateProfile, UpsertProfile};
use resolution_entity::ticket::{
    CreateTicket, DailyStatusCount, StatusCount, Ticket, TicketKind, TicketStatus, UpdateTicket,
};
use resolution_entity::todo::{CreateTask, CreateTodoList, Task, TodoList, UpdateTask};
use resolution_entity::user::{CreateUser, UpdateUser, User};
use resolution_entity::verification::{CreateVerificationCode, VerificationCode};

/// User accounts.
#[async_trait]
pub trait UserRepository: Send + Sync + std::fmt::Debug + 'static {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;

    /// Case-insensitive lookup.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// All users ordered by id.
    async fn find_all(&self) -> AppResult<Vec<User>>;

    async fn create(&self, data: &CreateUser) -> AppResult<User>;

    /// Apply a partial update. Returns `None` if the user does not exist.
    async fn update(&self, id: i64, data: &UpdateUser) -> AppResult<Option<User>>;

    async fn set_verified(&self, id: i64, verified: bool) -> AppResult<()>;

    async fn set_admin(&self, id: i64, is_admin: bool) -> AppResult<()>;

    /// Delete a user and everything that references it.
    async fn delete(&self, id: i64) -> AppResult<bool>;

    async fn count(&self) -> AppResult<i64>;
}

/// One-time verification codes.
#[async_trait]
pub trait VerificationRepository: Send + Sync + std::fmt::Debug + 'static {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<VerificationCode>>;

    async fn find_by_user(&self, user_id: i64) -> AppResult<Option<VerificationCode>>;

    async fn find_all(&self) -> AppResult<Vec<VerificationCode>>;

    /// Store the user's code, overwriting any previous one in a single
    /// statement. The flag is true when an earlier code was overwritten.
    async fn replace_for_user(
        &self,
        data: &CreateVerificationCode,
    ) -> AppResult<(VerificationCode, bool)>;

    /// Overwrite the code and expiry of an existing record.
    async fn regenerate(
        &self,
        id: i64,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<Option<VerificationCode>>;

    async fn delete(&self, id: i64) -> AppResult<bool>;

    /// Delete record `id` only if its expiry is still `expires_at`, so a
    /// code issued later is left alone.
    async fn delete_if_unchanged(&self, id: i64, expires_at: DateTime<Utc>) -> AppResult<bool>;

    /// Delete every code whose expiry is at or before `now`.
    async fn delete_expired(&self, now: DateTime<Utc>) -> AppResult<u64>;
}

/// Claims and requests. `kind` selects the table.
#[async_trait]
pub trait TicketRepository: Send + Sync + std::fmt::Debug + 'static {
    async fn create(&self, kind: TicketKind, data: &CreateTicket) -> AppResult<Ticket>;

    async fn find_by_id(&self, kind: TicketKind, id: i64) -> AppResult<Option<Ticket>>;

    /// All tickets, newest first.
    async fn find_all(
        &self,
        kind: TicketKind,
        status: Option<TicketStatus>,
    ) -> AppResult<Vec<Ticket>>;

    /// Tickets of one user, newest first.
    async fn find_by_user(
        &self,
        kind: TicketKind,
        user_id: i64,
        status: Option<TicketStatus>,
    ) -> AppResult<Vec<Ticket>>;

    async fn update(
        &self,
        kind: TicketKind,
        id: i64,
        data: &UpdateTicket,
    ) -> AppResult<Option<Ticket>>;

    async fn delete(&self, kind: TicketKind, id: i64) -> AppResult<bool>;

    async fn count(&self, kind: TicketKind) -> AppResult<i64>;

    /// Counts grouped by status. Statuses with no tickets are omitted.
    async fn count_by_status(&self, kind: TicketKind) -> AppResult<Vec<StatusCount>>;

    /// Counts grouped by UTC creation day and status for tickets created
    /// at or after `since`.
    async fn daily_counts_since(
        &self,
        kind: TicketKind,
        since: DateTime<Utc>,
    ) -> AppResult<Vec<DailyStatusCount>>;
}

/// User profiles.
#[async_trait]
pub trait ProfileRepository: Send + Sync + std::fmt::Debug + 'static {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Profile>>;

    async fn find_by_user(&self, user_id: i64) -> AppResult<Option<Profile>>;

    /// Create or fully replace the profile of `data.user_id`.
    async fn upsert(&self, data: &UpsertProfile) -> AppResult<Profile>;

    async fn update(&self, id: i64, data: &UpdateProfile) -> AppResult<Option<Profile>>;
}

/// Todo lists.
#[async_trait]
pub trait TodoListRepository: Send + Sync + std::fmt::Debug + 'static {
    async fn find_all(&self) -> AppResult<Vec<TodoList>>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<TodoList>>;

    async fn create(&self, data: &CreateTodoList) -> AppResult<TodoList>;

    async fn rename(&self, id: i64, name: &str) -> AppResult<Option<TodoList>>;

    /// Delete a list and its tasks.
    async fn delete(&self, id: i64) -> AppResult<bool>;
}

/// Tasks inside todo lists.
#[async_trait]
pub trait TaskRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Tasks ordered by id, optionally restricted to one list.
    async fn find_all(&self, todo_list_id: Option<i64>) -> AppResult<Vec<Task>>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Task>>;

    async fn create(&self, data: &CreateTask) -> AppResult<Task>;

    async fn update(&self, id: i64, data: &UpdateTask) -> AppResult<Option<Task>>;

    async fn delete(&self, id: i64) -> AppResult<bool>;
}
