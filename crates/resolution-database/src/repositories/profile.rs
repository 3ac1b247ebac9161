//! Profile repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use resolution_core::result::AppResult;
use resolution_entity::profile::{Profile, UpdateProfile, UpsertProfile};

use crate::error::map_sqlx;
use crate::traits::ProfileRepository;

/// PostgreSQL-backed [`ProfileRepository`].
#[derive(Debug, Clone)]
pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    /// Create a new profile repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Profile>> {
        sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx("Failed to find profile", e))
    }

    async fn find_by_user(&self, user_id: i64) -> AppResult<Option<Profile>> {
        sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx("Failed to find profile for user", e))
    }

    async fn upsert(&self, data: &UpsertProfile) -> AppResult<Profile> {
        sqlx::query_as::<_, Profile>(
            "INSERT INTO profiles (user_id, first_name, last_name, email, phone, photo) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT ON CONSTRAINT profiles_user_id_key DO UPDATE SET \
                first_name = EXCLUDED.first_name, \
                last_name = EXCLUDED.last_name, \
                email = EXCLUDED.email, \
                phone = EXCLUDED.phone, \
                photo = EXCLUDED.photo, \
                updated_at = NOW() \
             RETURNING *",
        )
        .bind(data.user_id)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(&data.photo)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx("Failed to save profile", e))
    }

    async fn update(&self, id: i64, data: &UpdateProfile) -> AppResult<Option<Profile>> {
        sqlx::query_as::<_, Profile>(
            "UPDATE profiles SET \
                first_name = COALESCE($2, first_name), \
                last_name = COALESCE($3, last_name), \
                email = COALESCE($4, email), \
                phone = CASE WHEN $5 THEN $6 ELSE phone END, \
                photo = COALESCE($7, photo), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(id)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.email)
        .bind(data.phone.is_some())
        .bind(data.phone.clone().flatten())
        .bind(&data.photo)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx("Failed to update profile", e))
    }
}
