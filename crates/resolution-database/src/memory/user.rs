use async_trait::async_trait;
use chrono::Utc;

use resolution_core::AppResult;
use resolution_core::error::AppError;
use resolution_entity::user::{CreateUser, UpdateUser, User};

use super::{MemoryStore, Tables};
use crate::error::{EMAIL_TAKEN, PHONE_TAKEN};
use crate::traits::UserRepository;

impl Tables {
    /// Enforce `users_email_key` and `users_phone_key` for a row that
    /// would carry `email`/`phone`, ignoring the row `except`.
    fn check_user_unique(
        &self,
        except: Option<i64>,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> AppResult<()> {
        for user in self.users.values().filter(|u| Some(u.id) != except) {
            if email.is_some_and(|e| user.email.eq_ignore_ascii_case(e)) {
                return Err(AppError::conflict(EMAIL_TAKEN));
            }
            if phone.is_some() && user.phone.as_deref() == phone {
                return Err(AppError::conflict(PHONE_TAKEN));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        Ok(self.tables.read().await.users.values().cloned().collect())
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let mut tables = self.tables.write().await;
        tables.check_user_unique(None, Some(&data.email), data.phone.as_deref())?;

        let now = Utc::now();
        let user = User {
            id: tables.next_id("users"),
            first_name: data.first_name.clone(),
            last_name: data.last_name.clone(),
            email: data.email.to_lowercase(),
            password_hash: data.password_hash.clone(),
            phone: data.phone.clone(),
            verified: false,
            is_admin: false,
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, id: i64, data: &UpdateUser) -> AppResult<Option<User>> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&id) {
            return Ok(None);
        }
        let new_phone = data.phone.as_ref().and_then(|p| p.as_deref());
        tables.check_user_unique(Some(id), data.email.as_deref(), new_phone)?;

        let Some(user) = tables.users.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(first_name) = &data.first_name {
            user.first_name = first_name.clone();
        }
        if let Some(last_name) = &data.last_name {
            user.last_name = last_name.clone();
        }
        if let Some(email) = &data.email {
            user.email = email.to_lowercase();
        }
        if let Some(hash) = &data.password_hash {
            user.password_hash = hash.clone();
        }
        if let Some(phone) = &data.phone {
            user.phone = phone.clone();
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn set_verified(&self, id: i64, verified: bool) -> AppResult<()> {
        if let Some(user) = self.tables.write().await.users.get_mut(&id) {
            user.verified = verified;
            user.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn set_admin(&self, id: i64, is_admin: bool) -> AppResult<()> {
        if let Some(user) = self.tables.write().await.users.get_mut(&id) {
            user.is_admin = is_admin;
            user.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.users.remove(&id).is_none() {
            return Ok(false);
        }
        tables.codes.retain(|_, c| c.user_id != id);
        tables.claims.retain(|_, t| t.user_id != id);
        tables.requests.retain(|_, t| t.user_id != id);
        tables.profiles.retain(|_, p| p.user_id != id);
        Ok(true)
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(self.tables.read().await.users.len() as i64)
    }
}
