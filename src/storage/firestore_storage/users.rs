//! 教务用户存储操作

use super::FirestoreStorage;
use crate::errors::Result;
use crate::models::users::entities::UserProfile;

impl FirestoreStorage {
    pub async fn get_hr_user_impl(&self, uid: &str) -> Result<Option<UserProfile>> {
        self.client.get::<UserProfile>(uid).await
    }

    pub async fn create_hr_user_impl(&self, mut user: UserProfile) -> Result<UserProfile> {
        self.client.create(&mut user).await?;
        Ok(user)
    }

    pub async fn update_hr_user_impl(&self, mut user: UserProfile) -> Result<UserProfile> {
        self.client.update(&mut user).await?;
        Ok(user)
    }
}
