//! 学生实体（`students` 集合）

use chrono::{DateTime, Utc};

use super::users::{read_profile, write_profile};
use super::zero_time;
use crate::firestore::{Fields, FirestoreDocument};
use crate::models::students::entities::{
    DEFAULT_ATTENDANCE_PERCENTAGE, DEFAULT_GRADE_LEVEL, StudentProfile,
};
use crate::models::users::entities::UserRole;

impl FirestoreDocument for StudentProfile {
    const COLLECTION: &'static str = "students";

    fn document_id(&self) -> &str {
        self.id()
    }

    fn to_fields(&self) -> Fields {
        let mut fields = Fields::new();
        write_profile(&mut fields, &self.profile);
        fields
            .string("studentId", &self.student_id)
            .string("gradeLevel", &self.grade_level)
            .string("parentName", &self.parent_name)
            .string("parentEmail", &self.parent_email)
            .string("parentPhone", &self.parent_phone)
            .string_array("enrolledSubjects", &self.enrolled_subjects)
            .string("classId", &self.class_id)
            .string("emergencyContact", &self.emergency_contact)
            .double("gpa", self.gpa)
            .integer("attendancePercentage", i64::from(self.attendance_percentage))
            .timestamp("enrollmentDate", self.enrollment_date);
        fields
    }

    fn from_fields(id: &str, fields: &Fields) -> Self {
        Self {
            profile: read_profile(id, fields, UserRole::Student),
            student_id: fields.get_string("studentId").unwrap_or_default(),
            grade_level: fields.string_or("gradeLevel", DEFAULT_GRADE_LEVEL),
            parent_name: fields.get_string("parentName").unwrap_or_default(),
            parent_email: fields.get_string("parentEmail").unwrap_or_default(),
            parent_phone: fields.get_string("parentPhone").unwrap_or_default(),
            enrolled_subjects: fields
                .get_string_array("enrolledSubjects")
                .unwrap_or_default(),
            class_id: fields.get_string("classId").unwrap_or_default(),
            emergency_contact: fields.get_string("emergencyContact").unwrap_or_default(),
            gpa: fields.get_f64("gpa").unwrap_or_default(),
            attendance_percentage: fields
                .get_i64("attendancePercentage")
                .and_then(|v| i32::try_from(v).ok())
                .unwrap_or(DEFAULT_ATTENDANCE_PERCENTAGE),
            enrollment_date: fields
                .get_timestamp("enrollmentDate")
                .unwrap_or_else(zero_time),
        }
    }

    fn created_at_mut(&mut self) -> Option<&mut DateTime<Utc>> {
        Some(&mut self.profile.created_at)
    }

    fn updated_at_mut(&mut self) -> Option<&mut DateTime<Utc>> {
        Some(&mut self.profile.updated_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::firestore::{Document, Value};
    use chrono::TimeZone;
    use serde_json::json;

    fn sample() -> StudentProfile {
        let mut student = StudentProfile::new("s1", "ada@school.test", "Ada Obi");
        let ts = Utc.with_ymd_and_hms(2023, 9, 1, 8, 0, 0).unwrap();
        student.profile.created_at = ts;
        student.profile.updated_at = ts;
        student.enrollment_date = ts;
        student.student_id = "STU-001".into();
        student.grade_level = "11".into();
        student.enrolled_subjects = vec!["Math".into(), "Physics".into()];
        student.class_id = "10A".into();
        student.gpa = 3.25;
        student.attendance_percentage = 87;
        student
    }

    #[test]
    fn test_student_round_trip() {
        let student = sample();
        assert_eq!(StudentProfile::from_fields("s1", &student.to_fields()), student);
    }

    #[test]
    fn test_student_defaults() {
        let mut fields = Fields::new();
        fields.string("fullName", "Bo").string("gradeLevel", "");
        let parsed = StudentProfile::from_fields("s2", &fields);
        assert_eq!(parsed.grade_level, DEFAULT_GRADE_LEVEL);
        assert_eq!(parsed.attendance_percentage, DEFAULT_ATTENDANCE_PERCENTAGE);
        assert_eq!(parsed.profile.role, UserRole::Student);
        assert_eq!(parsed.gpa, 0.0);
        assert!(parsed.enrolled_subjects.is_empty());
    }

    #[test]
    fn test_numbers_accept_either_tag() {
        let mut fields = Fields::new();
        fields
            .insert("gpa", Value::IntegerValue(3))
            .insert("attendancePercentage", Value::DoubleValue(92.0));
        let parsed = StudentProfile::from_fields("s3", &fields);
        assert_eq!(parsed.gpa, 3.0);
        assert_eq!(parsed.attendance_percentage, 92);
    }

    #[test]
    fn test_from_wire_document() {
        let doc: Document = serde_json::from_value(json!({
            "name": "projects/p/databases/(default)/documents/students/s9",
            "fields": {
                "fullName": {"stringValue": "Chi"},
                "gpa": {"doubleValue": 2.5},
                "attendancePercentage": {"integerValue": "75"},
                "classId": {"stringValue": "10B"}
            }
        }))
        .unwrap();
        let student = StudentProfile::from_document(&doc).unwrap();
        assert_eq!(student.id(), "s9");
        assert_eq!(student.attendance_percentage, 75);
        assert_eq!(student.class_id, "10B");
    }

    #[test]
    fn test_document_without_fields_is_absent() {
        let doc: Document = serde_json::from_value(json!({
            "name": "projects/p/databases/(default)/documents/students/s9"
        }))
        .unwrap();
        assert!(StudentProfile::from_document(&doc).is_none());
    }
}
