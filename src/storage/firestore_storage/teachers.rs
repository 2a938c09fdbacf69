//! 教师存储操作

use chrono::Utc;

use super::FirestoreStorage;
use crate::errors::Result;
use crate::firestore::{FirestoreDocument, Value};
use crate::models::classes::entities::Class;
use crate::models::teachers::entities::TeacherProfile;

impl FirestoreStorage {
    pub async fn get_teacher_impl(&self, id: &str) -> Result<Option<TeacherProfile>> {
        self.client.get::<TeacherProfile>(id).await
    }

    pub async fn list_teachers_impl(&self) -> Result<Vec<TeacherProfile>> {
        self.client.list::<TeacherProfile>().await
    }

    pub async fn create_teacher_impl(
        &self,
        mut teacher: TeacherProfile,
    ) -> Result<TeacherProfile> {
        self.client.create(&mut teacher).await?;
        Ok(teacher)
    }

    pub async fn update_teacher_impl(
        &self,
        mut teacher: TeacherProfile,
    ) -> Result<TeacherProfile> {
        self.client.update(&mut teacher).await?;
        Ok(teacher)
    }

    pub async fn delete_teacher_impl(&self, id: &str) -> Result<bool> {
        if self.get_teacher_impl(id).await?.is_none() {
            return Ok(false);
        }

        let now = Utc::now();
        let mut writes = vec![self.client.delete_write::<TeacherProfile>(id)];
        let classes = self
            .client
            .query::<Class>("teacherId", Value::string(id), None)
            .await?;
        for mut class in classes {
            class.teacher_id.clear();
            class.teacher_name.clear();
            class.stamp_for_update(now);
            writes.push(self.client.update_write(&class));
        }

        self.client.commit(&writes).await?;
        Ok(true)
    }
}
