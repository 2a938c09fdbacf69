//! 成绩存储操作

use super::FirestoreStorage;
use crate::errors::Result;
use crate::firestore::Value;
use crate::models::grades::entities::Grade;

impl FirestoreStorage {
    pub async fn get_grade_impl(&self, id: &str) -> Result<Option<Grade>> {
        self.client.get::<Grade>(id).await
    }

    pub async fn list_grades_by_student_impl(&self, student_id: &str) -> Result<Vec<Grade>> {
        self.client
            .query::<Grade>("studentId", Value::string(student_id), None)
            .await
    }

    pub async fn list_grades_by_teacher_impl(&self, teacher_id: &str) -> Result<Vec<Grade>> {
        self.client
            .query::<Grade>("teacherId", Value::string(teacher_id), None)
            .await
    }

    pub async fn create_grade_impl(&self, mut grade: Grade) -> Result<Grade> {
        grade.recalculate();
        self.client.create(&mut grade).await?;
        Ok(grade)
    }

    pub async fn update_grade_impl(&self, mut grade: Grade) -> Result<Grade> {
        grade.recalculate();
        self.client.update(&mut grade).await?;
        Ok(grade)
    }
}
