use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::users::entities::{UserProfile, UserRole};

// 教师档案
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherProfile {
    #[serde(flatten)]
    pub profile: UserProfile,
    pub teacher_id: String,
    pub department: String,
    pub subjects: Vec<String>,
    // 所带班级 ID，教师端所有学生数据的访问边界
    pub classes: Vec<String>,
    pub hire_date: DateTime<Utc>,
    pub qualification: String,
    pub specialization: String,
    pub employee_id: String,
    pub is_head_of_department: bool,
}

impl TeacherProfile {
    pub fn new(id: &str, email: &str, full_name: &str) -> Self {
        let profile = UserProfile::new(id, email, full_name, UserRole::Teacher);
        let hire_date = profile.created_at;
        Self {
            profile,
            teacher_id: String::new(),
            department: String::new(),
            subjects: Vec::new(),
            classes: Vec::new(),
            hire_date,
            qualification: String::new(),
            specialization: String::new(),
            employee_id: String::new(),
            is_head_of_department: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.profile.id
    }

    pub fn full_name(&self) -> &str {
        &self.profile.full_name
    }

    pub fn teaches_class(&self, class_id: &str) -> bool {
        self.classes.iter().any(|c| c == class_id)
    }
}
