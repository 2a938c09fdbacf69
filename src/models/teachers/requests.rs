use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::models::common::PaginationQuery;

// 教师列表查询参数（来自HTTP请求）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeacherListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
    pub department: Option<String>,
    // name | classes | hireDate
    #[serde(alias = "sortBy")]
    pub sort_by: Option<String>,
}

// 教务新增教师
#[derive(Debug, Deserialize)]
pub struct CreateTeacherRequest {
    pub email: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub teacher_id: String,
    pub department: String,
    #[serde(default)]
    pub subjects: Vec<String>,
    pub hire_date: Option<DateTime<Utc>>,
    pub qualification: Option<String>,
    pub specialization: Option<String>,
    pub employee_id: Option<String>,
    #[serde(default)]
    pub is_head_of_department: bool,
}

// 教务更新教师；班级分配走单独接口
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTeacherRequest {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub department: Option<String>,
    pub subjects: Option<Vec<String>>,
    pub qualification: Option<String>,
    pub specialization: Option<String>,
    pub employee_id: Option<String>,
    pub is_head_of_department: Option<bool>,
    pub is_active: Option<bool>,
}

impl UpdateTeacherRequest {
    pub fn apply(self, teacher: &mut super::entities::TeacherProfile) {
        if let Some(v) = self.full_name {
            teacher.profile.full_name = v;
        }
        if let Some(v) = self.phone {
            teacher.profile.phone = v;
        }
        if let Some(v) = self.address {
            teacher.profile.address = v;
        }
        if let Some(v) = self.is_active {
            teacher.profile.is_active = v;
        }
        if let Some(v) = self.department {
            teacher.department = v;
        }
        if let Some(v) = self.subjects {
            teacher.subjects = v;
        }
        if let Some(v) = self.qualification {
            teacher.qualification = v;
        }
        if let Some(v) = self.specialization {
            teacher.specialization = v;
        }
        if let Some(v) = self.employee_id {
            teacher.employee_id = v;
        }
        if let Some(v) = self.is_head_of_department {
            teacher.is_head_of_department = v;
        }
    }
}
