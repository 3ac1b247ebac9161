//! User repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use resolution_core::result::AppResult;
use resolution_entity::user::{CreateUser, UpdateUser, User};

use crate::error::map_sqlx;
use crate::traits::UserRepository;

/// PostgreSQL-backed [`UserRepository`].
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx("Failed to find user by id", e))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx("Failed to find user by email", e))
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx("Failed to list users", e))
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (first_name, last_name, email, password_hash, phone) \
             VALUES ($1, $2, LOWER($3), $4, $5) \
             RETURNING *",
        )
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(&data.phone)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx("Failed to create user", e))
    }

    async fn update(&self, id: i64, data: &UpdateUser) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET \
                first_name = COALESCE($2, first_name), \
                last_name = COALESCE($3, last_name), \
                email = COALESCE(LOWER($4), email), \
                password_hash = COALESCE($5, password_hash), \
                phone = CASE WHEN $6 THEN $7 ELSE phone END, \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(id)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(data.phone.is_some())
        .bind(data.phone.clone().flatten())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx("Failed to update user", e))
    }

    async fn set_verified(&self, id: i64, verified: bool) -> AppResult<()> {
        sqlx::query("UPDATE users SET verified = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(verified)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx("Failed to update verification flag", e))?;
        Ok(())
    }

    async fn set_admin(&self, id: i64, is_admin: bool) -> AppResult<()> {
        sqlx::query("UPDATE users SET is_admin = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(is_admin)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx("Failed to update admin flag", e))?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx("Failed to delete user", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx("Failed to count users", e))
    }
}
