use async_trait::async_trait;
use chrono::{DateTime, Utc};

use resolution_core::AppResult;
use resolution_core::error::AppError;
use resolution_entity::verification::{CreateVerificationCode, VerificationCode};

use super::MemoryStore;
use crate::traits::VerificationRepository;

#[async_trait]
impl VerificationRepository for MemoryStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<VerificationCode>> {
        Ok(self.tables.read().await.codes.get(&id).cloned())
    }

    async fn find_by_user(&self, user_id: i64) -> AppResult<Option<VerificationCode>> {
        let tables = self.tables.read().await;
        Ok(tables.codes.values().find(|c| c.user_id == user_id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<VerificationCode>> {
        Ok(self.tables.read().await.codes.values().cloned().collect())
    }

    async fn replace_for_user(
        &self,
        data: &CreateVerificationCode,
    ) -> AppResult<(VerificationCode, bool)> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&data.user_id) {
            return Err(AppError::not_found(format!(
                "User {} does not exist",
                data.user_id
            )));
        }

        if let Some(existing) = tables.codes.values_mut().find(|c| c.user_id == data.user_id) {
            existing.code = data.code.clone();
            existing.expires_at = data.expires_at;
            existing.created_at = Utc::now();
            return Ok((existing.clone(), true));
        }

        let record = VerificationCode {
            id: tables.next_id("verification_codes"),
            user_id: data.user_id,
            code: data.code.clone(),
            created_at: Utc::now(),
            expires_at: data.expires_at,
        };
        tables.codes.insert(record.id, record.clone());
        Ok((record, false))
    }

    async fn regenerate(
        &self,
        id: i64,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<Option<VerificationCode>> {
        let mut tables = self.tables.write().await;
        Ok(tables.codes.get_mut(&id).map(|record| {
            record.code = code.to_string();
            record.expires_at = expires_at;
            record.created_at = Utc::now();
            record.clone()
        }))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        Ok(self.tables.write().await.codes.remove(&id).is_some())
    }

    async fn delete_if_unchanged(&self, id: i64, expires_at: DateTime<Utc>) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        let unchanged = tables
            .codes
            .get(&id)
            .is_some_and(|c| c.expires_at == expires_at);
        if unchanged {
            tables.codes.remove(&id);
        }
        Ok(unchanged)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let mut tables = self.tables.write().await;
        let before = tables.codes.len();
        tables.codes.retain(|_, c| !c.is_expired_at(now));
        Ok((before - tables.codes.len()) as u64)
    }
}
