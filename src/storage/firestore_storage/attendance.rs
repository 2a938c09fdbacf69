//! 考勤存储操作

use chrono::Utc;

use super::FirestoreStorage;
use crate::errors::Result;
use crate::firestore::{Direction, FirestoreDocument, Value};
use crate::models::attendance::entities::Attendance;

impl FirestoreStorage {
    pub async fn list_attendance_by_class_impl(&self, class_id: &str) -> Result<Vec<Attendance>> {
        self.client
            .query::<Attendance>("classId", Value::string(class_id), None)
            .await
    }

    /// 最近的记录在前（需要 studentId + date 复合索引）
    pub async fn list_attendance_by_student_impl(
        &self,
        student_id: &str,
    ) -> Result<Vec<Attendance>> {
        self.client
            .query::<Attendance>(
                "studentId",
                Value::string(student_id),
                Some(("date", Direction::Descending)),
            )
            .await
    }

    pub async fn record_attendance_impl(
        &self,
        mut records: Vec<Attendance>,
    ) -> Result<Vec<Attendance>> {
        if records.is_empty() {
            return Ok(records);
        }

        let now = Utc::now();
        let writes: Vec<_> = records
            .iter_mut()
            .map(|record| {
                record.stamp_for_create(now);
                self.client.update_write(&*record)
            })
            .collect();

        self.client.commit(&writes).await?;
        Ok(records)
    }
}
