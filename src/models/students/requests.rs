use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::models::common::PaginationQuery;

// 学生列表查询参数（来自HTTP请求）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
    #[serde(alias = "gradeLevel")]
    pub grade_level: Option<String>,
    // name | gpa | attendance | enrollmentDate
    #[serde(alias = "sortBy")]
    pub sort_by: Option<String>,
}

// 教务新增学生
#[derive(Debug, Deserialize)]
pub struct CreateStudentRequest {
    pub email: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub student_id: String,
    pub grade_level: Option<String>,
    pub parent_name: Option<String>,
    pub parent_email: Option<String>,
    pub parent_phone: Option<String>,
    #[serde(default)]
    pub enrolled_subjects: Vec<String>,
    pub class_id: Option<String>,
    pub emergency_contact: Option<String>,
    pub date_of_birth: Option<DateTime<Utc>>,
    pub address: Option<String>,
}

// 教务更新学生，班级调整走单独的分班接口
#[derive(Debug, Default, Deserialize)]
pub struct UpdateStudentRequest {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub grade_level: Option<String>,
    pub parent_name: Option<String>,
    pub parent_email: Option<String>,
    pub parent_phone: Option<String>,
    pub enrolled_subjects: Option<Vec<String>>,
    pub emergency_contact: Option<String>,
    pub gpa: Option<f64>,
    pub attendance_percentage: Option<i32>,
    pub is_active: Option<bool>,
}

impl UpdateStudentRequest {
    pub fn apply(self, student: &mut super::entities::StudentProfile) {
        if let Some(v) = self.full_name {
            student.profile.full_name = v;
        }
        if let Some(v) = self.phone {
            student.profile.phone = v;
        }
        if let Some(v) = self.address {
            student.profile.address = v;
        }
        if let Some(v) = self.is_active {
            student.profile.is_active = v;
        }
        if let Some(v) = self.grade_level {
            student.grade_level = v;
        }
        if let Some(v) = self.parent_name {
            student.parent_name = v;
        }
        if let Some(v) = self.parent_email {
            student.parent_email = v;
        }
        if let Some(v) = self.parent_phone {
            student.parent_phone = v;
        }
        if let Some(v) = self.enrolled_subjects {
            student.enrolled_subjects = v;
        }
        if let Some(v) = self.emergency_contact {
            student.emergency_contact = v;
        }
        if let Some(v) = self.gpa {
            student.gpa = v.clamp(0.0, 4.0);
        }
        if let Some(v) = self.attendance_percentage {
            student.attendance_percentage = v.clamp(0, 100);
        }
    }
}
