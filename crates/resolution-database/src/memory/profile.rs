use async_trait::async_trait;
use chrono::Utc;

use resolution_core::AppResult;
use resolution_core::error::AppError;
use resolution_entity::profile::{Profile, UpdateProfile, UpsertProfile};

use super::MemoryStore;
use crate::traits::ProfileRepository;

#[async_trait]
impl ProfileRepository for MemoryStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Profile>> {
        Ok(self.tables.read().await.profiles.get(&id).cloned())
    }

    async fn find_by_user(&self, user_id: i64) -> AppResult<Option<Profile>> {
        let tables = self.tables.read().await;
        Ok(tables
            .profiles
            .values()
            .find(|p| p.user_id == user_id)
            .cloned())
    }

    async fn upsert(&self, data: &UpsertProfile) -> AppResult<Profile> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&data.user_id) {
            return Err(AppError::not_found(format!(
                "User {} does not exist",
                data.user_id
            )));
        }

        let now = Utc::now();
        let existing = tables
            .profiles
            .values()
            .find(|p| p.user_id == data.user_id)
            .map(|p| (p.id, p.created_at));
        let (id, created_at) = match existing {
            Some(found) => found,
            None => (tables.next_id("profiles"), now),
        };

        let profile = Profile {
            id,
            user_id: data.user_id,
            first_name: data.first_name.clone(),
            last_name: data.last_name.clone(),
            email: data.email.clone(),
            phone: data.phone.clone(),
            photo: data.photo.clone(),
            created_at,
            updated_at: now,
        };
        tables.profiles.insert(id, profile.clone());
        Ok(profile)
    }

    async fn update(&self, id: i64, data: &UpdateProfile) -> AppResult<Option<Profile>> {
        let mut tables = self.tables.write().await;
        Ok(tables.profiles.get_mut(&id).map(|profile| {
            if let Some(first_name) = &data.first_name {
                profile.first_name = first_name.clone();
            }
            if let Some(last_name) = &data.last_name {
                profile.last_name = last_name.clone();
            }
            if let Some(email) = &data.email {
                profile.email = email.clone();
            }
            if let Some(phone) = &data.phone {
                profile.phone = phone.clone();
            }
            if let Some(photo) = &data.photo {
                profile.photo = photo.clone();
            }
            profile.updated_at = Utc::now();
            profile.clone()
        }))
    }
}
