use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::users::entities::{UserProfile, UserRole};

/// 未指定年级时的默认值
pub const DEFAULT_GRADE_LEVEL: &str = "10";
/// 没有考勤数据时视为全勤
pub const DEFAULT_ATTENDANCE_PERCENTAGE: i32 = 100;

// 学生档案
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentProfile {
    #[serde(flatten)]
    pub profile: UserProfile,
    // 学号（人类可读）
    pub student_id: String,
    pub grade_level: String,
    pub parent_name: String,
    pub parent_email: String,
    pub parent_phone: String,
    pub enrolled_subjects: Vec<String>,
    // 所属班级，教师可见范围以此判定
    pub class_id: String,
    pub emergency_contact: String,
    // 4 分制
    pub gpa: f64,
    pub attendance_percentage: i32,
    pub enrollment_date: DateTime<Utc>,
}

impl StudentProfile {
    pub fn new(id: &str, email: &str, full_name: &str) -> Self {
        let profile = UserProfile::new(id, email, full_name, UserRole::Student);
        let enrollment_date = profile.created_at;
        Self {
            profile,
            student_id: String::new(),
            grade_level: DEFAULT_GRADE_LEVEL.to_string(),
            parent_name: String::new(),
            parent_email: String::new(),
            parent_phone: String::new(),
            enrolled_subjects: Vec::new(),
            class_id: String::new(),
            emergency_contact: String::new(),
            gpa: 0.0,
            attendance_percentage: DEFAULT_ATTENDANCE_PERCENTAGE,
            enrollment_date,
        }
    }

    pub fn id(&self) -> &str {
        &self.profile.id
    }

    pub fn full_name(&self) -> &str {
        &self.profile.full_name
    }
}
