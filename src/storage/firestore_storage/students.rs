//! 学生存储操作

use chrono::Utc;

use super::FirestoreStorage;
use crate::errors::Result;
use crate::firestore::{FirestoreDocument, Value};
use crate::models::classes::entities::Class;
use crate::models::students::entities::StudentProfile;

impl FirestoreStorage {
    pub async fn get_student_impl(&self, id: &str) -> Result<Option<StudentProfile>> {
        self.client.get::<StudentProfile>(id).await
    }

    pub async fn list_students_impl(&self) -> Result<Vec<StudentProfile>> {
        self.client.list::<StudentProfile>().await
    }

    pub async fn list_students_by_class_impl(
        &self,
        class_id: &str,
    ) -> Result<Vec<StudentProfile>> {
        self.client
            .query::<StudentProfile>("classId", Value::string(class_id), None)
            .await
    }

    pub async fn create_student_impl(
        &self,
        mut student: StudentProfile,
    ) -> Result<StudentProfile> {
        self.client.create(&mut student).await?;
        Ok(student)
    }

    pub async fn update_student_impl(
        &self,
        mut student: StudentProfile,
    ) -> Result<StudentProfile> {
        self.client.update(&mut student).await?;
        Ok(student)
    }

    pub async fn delete_student_impl(&self, id: &str) -> Result<bool> {
        let Some(student) = self.get_student_impl(id).await? else {
            return Ok(false);
        };

        let mut writes = vec![self.client.delete_write::<StudentProfile>(id)];
        if !student.class_id.is_empty()
            && let Some(mut class) = self.client.get::<Class>(&student.class_id).await?
            && class.has_student(id)
        {
            class.student_ids.retain(|s| s != id);
            class.stamp_for_update(Utc::now());
            writes.push(self.client.update_write(&class));
        }

        self.client.commit(&writes).await?;
        Ok(true)
    }
}
