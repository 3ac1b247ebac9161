//! Claim and request repository implementation.
//!
//! Both kinds share one column layout, so the SQL is built per call from
//! [`TicketKind::table`], which only yields fixed table names.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use resolution_core::result::AppResult;
use resolution_entity::ticket::{
    CreateTicket, DailyStatusCount, StatusCount, Ticket, TicketKind, TicketStatus, UpdateTicket,
};

use crate::error::map_sqlx;
use crate::traits::TicketRepository;

/// PostgreSQL-backed [`TicketRepository`].
#[derive(Debug, Clone)]
pub struct PgTicketRepository {
    pool: PgPool,
}

impl PgTicketRepository {
    /// Create a new ticket repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TicketRepository for PgTicketRepository {
    async fn create(&self, kind: TicketKind, data: &CreateTicket) -> AppResult<Ticket> {
        let sql = format!(
            "INSERT INTO {} (user_id, subject, description, status) \
             VALUES ($1, $2, $3, $4) \
             RETURNING *",
            kind.table()
        );
        sqlx::query_as::<_, Ticket>(&sql)
            .bind(data.user_id)
            .bind(&data.subject)
            .bind(&data.description)
            .bind(data.status)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx("Failed to create ticket", e))
    }

    async fn find_by_id(&self, kind: TicketKind, id: i64) -> AppResult<Option<Ticket>> {
        let sql = format!("SELECT * FROM {} WHERE id = $1", kind.table());
        sqlx::query_as::<_, Ticket>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx("Failed to find ticket", e))
    }

    async fn find_all(
        &self,
        kind: TicketKind,
        status: Option<TicketStatus>,
    ) -> AppResult<Vec<Ticket>> {
        let sql = format!(
            "SELECT * FROM {} \
             WHERE ($1::ticket_status IS NULL OR status = $1) \
             ORDER BY created_at DESC, id DESC",
            kind.table()
        );
        sqlx::query_as::<_, Ticket>(&sql)
            .bind(status)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx("Failed to list tickets", e))
    }

    async fn find_by_user(
        &self,
        kind: TicketKind,
        user_id: i64,
        status: Option<TicketStatus>,
    ) -> AppResult<Vec<Ticket>> {
        let sql = format!(
            "SELECT * FROM {} \
             WHERE user_id = $1 AND ($2::ticket_status IS NULL OR status = $2) \
             ORDER BY created_at DESC, id DESC",
            kind.table()
        );
        sqlx::query_as::<_, Ticket>(&sql)
            .bind(user_id)
            .bind(status)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx("Failed to list tickets for user", e))
    }

    async fn update(
        &self,
        kind: TicketKind,
        id: i64,
        data: &UpdateTicket,
    ) -> AppResult<Option<Ticket>> {
        let sql = format!(
            "UPDATE {} SET \
                subject = COALESCE($2, subject), \
                description = COALESCE($3, description), \
                status = COALESCE($4, status), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING *",
            kind.table()
        );
        sqlx::query_as::<_, Ticket>(&sql)
            .bind(id)
            .bind(&data.subject)
            .bind(&data.description)
            .bind(data.status)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx("Failed to update ticket", e))
    }

    async fn delete(&self, kind: TicketKind, id: i64) -> AppResult<bool> {
        let sql = format!("DELETE FROM {} WHERE id = $1", kind.table());
        let result = sqlx::query(&sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx("Failed to delete ticket", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self, kind: TicketKind) -> AppResult<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", kind.table());
        sqlx::query_scalar::<_, i64>(&sql)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx("Failed to count tickets", e))
    }

    async fn count_by_status(&self, kind: TicketKind) -> AppResult<Vec<StatusCount>> {
        let sql = format!(
            "SELECT status, COUNT(*) AS count FROM {} GROUP BY status",
            kind.table()
        );
        sqlx::query_as::<_, StatusCount>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx("Failed to count tickets by status", e))
    }

    async fn daily_counts_since(
        &self,
        kind: TicketKind,
        since: DateTime<Utc>,
    ) -> AppResult<Vec<DailyStatusCount>> {
        let sql = format!(
            "SELECT (created_at AT TIME ZONE 'UTC')::date AS day, status, COUNT(*) AS count \
             FROM {} \
             WHERE created_at >= $1 \
             GROUP BY day, status \
             ORDER BY day ASC",
            kind.table()
        );
        sqlx::query_as::<_, DailyStatusCount>(&sql)
            .bind(since)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx("Failed to aggregate daily ticket counts", e))
    }
}
