//! Verification code repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use resolution_core::result::AppResult;
use resolution_entity::verification::{CreateVerificationCode, VerificationCode};

use crate::error::map_sqlx;
use crate::traits::VerificationRepository;

/// Row returned by the per-user upsert. `xmax` is zero only for rows the
/// statement inserted.
#[derive(FromRow)]
struct UpsertedCode {
    #[sqlx(flatten)]
    record: VerificationCode,
    replaced: bool,
}

/// PostgreSQL-backed [`VerificationRepository`].
#[derive(Debug, Clone)]
pub struct PgVerificationRepository {
    pool: PgPool,
}

impl PgVerificationRepository {
    /// Create a new verification code repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VerificationRepository for PgVerificationRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<VerificationCode>> {
        sqlx::query_as::<_, VerificationCode>("SELECT * FROM verification_codes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx("Failed to find verification code", e))
    }

    async fn find_by_user(&self, user_id: i64) -> AppResult<Option<VerificationCode>> {
        sqlx::query_as::<_, VerificationCode>(
            "SELECT * FROM verification_codes WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx("Failed to find verification code for user", e))
    }

    async fn find_all(&self) -> AppResult<Vec<VerificationCode>> {
        sqlx::query_as::<_, VerificationCode>("SELECT * FROM verification_codes ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx("Failed to list verification codes", e))
    }

    async fn replace_for_user(
        &self,
        data: &CreateVerificationCode,
    ) -> AppResult<(VerificationCode, bool)> {
        let row = sqlx::query_as::<_, UpsertedCode>(
            "INSERT INTO verification_codes (user_id, code, expires_at) \
             VALUES ($1, $2, $3) \
             ON CONFLICT ON CONSTRAINT verification_codes_user_id_key DO UPDATE \
             SET code = EXCLUDED.code, expires_at = EXCLUDED.expires_at, created_at = NOW() \
             RETURNING *, (xmax <> 0) AS replaced",
        )
        .bind(data.user_id)
        .bind(&data.code)
        .bind(data.expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx("Failed to store verification code", e))?;

        Ok((row.record, row.replaced))
    }

    async fn regenerate(
        &self,
        id: i64,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<Option<VerificationCode>> {
        sqlx::query_as::<_, VerificationCode>(
            "UPDATE verification_codes SET code = $2, expires_at = $3, created_at = NOW() \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(id)
        .bind(code)
        .bind(expires_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx("Failed to regenerate verification code", e))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM verification_codes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx("Failed to delete verification code", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_if_unchanged(&self, id: i64, expires_at: DateTime<Utc>) -> AppResult<bool> {
        let result =
            sqlx::query("DELETE FROM verification_codes WHERE id = $1 AND expires_at = $2")
                .bind(id)
                .bind(expires_at)
                .execute(&self.pool)
                .await
                .map_err(|e| map_sqlx("Failed to expire verification code", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM verification_codes WHERE expires_at <= $1")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx("Failed to sweep expired verification codes", e))?;
        Ok(result.rows_affected())
    }
}
