//! 教师实体（`teachers` 集合）

use chrono::{DateTime, Utc};

use super::users::{read_profile, write_profile};
use super::zero_time;
use crate::firestore::{Fields, FirestoreDocument};
use crate::models::teachers::entities::TeacherProfile;
use crate::models::users::entities::UserRole;

impl FirestoreDocument for TeacherProfile {
    const COLLECTION: &'static str = "teachers";

    fn document_id(&self) -> &str {
        self.id()
    }

    fn to_fields(&self) -> Fields {
        let mut fields = Fields::new();
        write_profile(&mut fields, &self.profile);
        fields
            .string("teacherId", &self.teacher_id)
            .string("department", &self.department)
            .string_array("subjects", &self.subjects)
            .string_array("classes", &self.classes)
            .timestamp("hireDate", self.hire_date)
            .string("qualification", &self.qualification)
            .string("specialization", &self.specialization)
            .string("employeeId", &self.employee_id)
            .boolean("isHeadOfDepartment", self.is_head_of_department);
        fields
    }

    fn from_fields(id: &str, fields: &Fields) -> Self {
        Self {
            profile: read_profile(id, fields, UserRole::Teacher),
            teacher_id: fields.get_string("teacherId").unwrap_or_default(),
            department: fields.get_string("department").unwrap_or_default(),
            subjects: fields.get_string_array("subjects").unwrap_or_default(),
            classes: fields.get_string_array("classes").unwrap_or_default(),
            hire_date: fields.get_timestamp("hireDate").unwrap_or_else(zero_time),
            qualification: fields.get_string("qualification").unwrap_or_default(),
            specialization: fields.get_string("specialization").unwrap_or_default(),
            employee_id: fields.get_string("employeeId").unwrap_or_default(),
            is_head_of_department: fields.get_bool("isHeadOfDepartment").unwrap_or(false),
        }
    }

    fn created_at_mut(&mut self) -> Option<&mut DateTime<Utc>> {
        Some(&mut self.profile.created_at)
    }

    fn updated_at_mut(&mut self) -> Option<&mut DateTime<Utc>> {
        Some(&mut self.profile.updated_at)
    }
}
