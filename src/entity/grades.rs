//! 成绩实体（`grades` 集合）
//!
//! 总分和等级是派生值：写入时一并保存，读取时按分项重新计算。

use chrono::{DateTime, Utc};

use super::zero_time;
use crate::firestore::{Fields, FirestoreDocument};
use crate::models::grades::entities::{Grade, Term};

impl FirestoreDocument for Grade {
    const COLLECTION: &'static str = "grades";

    fn document_id(&self) -> &str {
        &self.id
    }

    fn to_fields(&self) -> Fields {
        let mut fields = Fields::new();
        fields
            .string("id", &self.id)
            .string("studentId", &self.student_id)
            .string("studentName", &self.student_name)
            .string("teacherId", &self.teacher_id)
            .string("subject", &self.subject)
            .string("term", self.term.as_str())
            .integer("year", i64::from(self.year))
            .double("test1", self.test1)
            .double("test2", self.test2)
            .double("exam", self.exam)
            .double("assignment", self.assignment)
            .double("totalScore", self.total_score)
            .string("letterGrade", &self.letter_grade)
            .string("remarks", &self.remarks)
            .timestamp("createdAt", self.created_at)
            .timestamp("updatedAt", self.updated_at);
        fields
    }

    fn from_fields(id: &str, fields: &Fields) -> Self {
        let mut grade = Self {
            id: id.to_string(),
            student_id: fields.get_string("studentId").unwrap_or_default(),
            student_name: fields.get_string("studentName").unwrap_or_default(),
            teacher_id: fields.get_string("teacherId").unwrap_or_default(),
            subject: fields.get_string("subject").unwrap_or_default(),
            term: fields
                .get_string("term")
                .and_then(|t| t.parse().ok())
                .unwrap_or(Term::First),
            year: fields
                .get_i64("year")
                .and_then(|y| i32::try_from(y).ok())
                .unwrap_or_default(),
            test1: fields.get_f64("test1").unwrap_or_default(),
            test2: fields.get_f64("test2").unwrap_or_default(),
            exam: fields.get_f64("exam").unwrap_or_default(),
            assignment: fields.get_f64("assignment").unwrap_or_default(),
            total_score: 0.0,
            letter_grade: String::new(),
            remarks: fields.get_string("remarks").unwrap_or_default(),
            created_at: fields.get_timestamp("createdAt").unwrap_or_else(zero_time),
            updated_at: fields.get_timestamp("updatedAt").unwrap_or_else(zero_time),
        };
        grade.recalculate();
        grade
    }

    fn created_at_mut(&mut self) -> Option<&mut DateTime<Utc>> {
        Some(&mut self.created_at)
    }

    fn updated_at_mut(&mut self) -> Option<&mut DateTime<Utc>> {
        Some(&mut self.updated_at)
    }
}
