//! 班级实体（`classes` 集合）
//!
//! 学生人数不落库，读取时由名单推导。

use chrono::{DateTime, Utc};

use super::zero_time;
use crate::firestore::{Fields, FirestoreDocument};
use crate::models::classes::entities::Class;

impl FirestoreDocument for Class {
    const COLLECTION: &'static str = "classes";

    fn document_id(&self) -> &str {
        &self.id
    }

    fn to_fields(&self) -> Fields {
        let mut fields = Fields::new();
        fields
            .string("id", &self.id)
            .string("name", &self.name)
            .string("gradeLevel", &self.grade_level)
            .string("teacherId", &self.teacher_id)
            .string("teacherName", &self.teacher_name)
            .string("subject", &self.subject)
            .string("room", &self.room)
            .string("schedule", &self.schedule)
            .string_array("studentIds", &self.student_ids)
            .timestamp("createdAt", self.created_at)
            .timestamp("updatedAt", self.updated_at);
        fields
    }

    fn from_fields(id: &str, fields: &Fields) -> Self {
        Self {
            id: id.to_string(),
            name: fields.get_string("name").unwrap_or_default(),
            grade_level: fields.get_string("gradeLevel").unwrap_or_default(),
            teacher_id: fields.get_string("teacherId").unwrap_or_default(),
            teacher_name: fields.get_string("teacherName").unwrap_or_default(),
            subject: fields.get_string("subject").unwrap_or_default(),
            room: fields.get_string("room").unwrap_or_default(),
            schedule: fields.get_string("schedule").unwrap_or_default(),
            student_ids: fields.get_string_array("studentIds").unwrap_or_default(),
            created_at: fields.get_timestamp("createdAt").unwrap_or_else(zero_time),
            updated_at: fields.get_timestamp("updatedAt").unwrap_or_else(zero_time),
        }
    }

    fn created_at_mut(&mut self) -> Option<&mut DateTime<Utc>> {
        Some(&mut self.created_at)
    }

    fn updated_at_mut(&mut self) -> Option<&mut DateTime<Utc>> {
        Some(&mut self.updated_at)
    }
}
