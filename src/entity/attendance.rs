//! 考勤实体（`attendance` 集合）

use chrono::{DateTime, Utc};

use super::zero_time;
use crate::firestore::{Fields, FirestoreDocument};
use crate::models::attendance::entities::{Attendance, AttendanceStatus};

impl FirestoreDocument for Attendance {
    const COLLECTION: &'static str = "attendance";

    fn document_id(&self) -> &str {
        &self.id
    }

    fn to_fields(&self) -> Fields {
        let mut fields = Fields::new();
        fields
            .string("id", &self.id)
            .string("studentId", &self.student_id)
            .string("studentName", &self.student_name)
            .string("classId", &self.class_id)
            .string("className", &self.class_name)
            .timestamp("date", self.date)
            .string("status", self.status.as_str())
            .string("remarks", &self.remarks)
            .string("recordedBy", &self.recorded_by)
            .timestamp("recordedAt", self.recorded_at);
        fields
    }

    // 状态无法识别时按缺勤处理
    fn from_fields(id: &str, fields: &Fields) -> Self {
        Self {
            id: id.to_string(),
            student_id: fields.get_string("studentId").unwrap_or_default(),
            student_name: fields.get_string("studentName").unwrap_or_default(),
            class_id: fields.get_string("classId").unwrap_or_default(),
            class_name: fields.get_string("className").unwrap_or_default(),
            date: fields.get_timestamp("date").unwrap_or_else(zero_time),
            status: fields
                .get_string("status")
                .and_then(|s| s.parse().ok())
                .unwrap_or(AttendanceStatus::Absent),
            remarks: fields.get_string("remarks").unwrap_or_default(),
            recorded_by: fields.get_string("recordedBy").unwrap_or_default(),
            recorded_at: fields.get_timestamp("recordedAt").unwrap_or_else(zero_time),
        }
    }

    fn created_at_mut(&mut self) -> Option<&mut DateTime<Utc>> {
        Some(&mut self.recorded_at)
    }
}
