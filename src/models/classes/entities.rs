use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Class {
    // 班级ID
    pub id: String,
    // 班级名称
    pub name: String,
    pub grade_level: String,
    // 任课教师（冗余存储姓名）
    pub teacher_id: String,
    pub teacher_name: String,
    pub subject: String,
    pub room: String,
    pub schedule: String,
    // 学生名单，与学生档案中的 class_id 在同一次提交中维护
    pub student_ids: Vec<String>,
    // 创建时间
    pub created_at: DateTime<Utc>,
    // 更新时间
    pub updated_at: DateTime<Utc>,
}

impl Class {
    pub fn new(id: &str, name: &str) -> Self {
        let now = Utc::now();
        Self {
            id: id.to_string(),
            name: name.to_string(),
            grade_level: String::new(),
            teacher_id: String::new(),
            teacher_name: String::new(),
            subject: String::new(),
            room: String::new(),
            schedule: String::new(),
            student_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// 学生人数，始终由名单推导
    pub fn student_count(&self) -> usize {
        self.student_ids.len()
    }

    pub fn has_student(&self, student_id: &str) -> bool {
        self.student_ids.iter().any(|s| s == student_id)
    }
}

// 带人数的班级视图
#[derive(Debug, Clone, Serialize)]
pub struct ClassSummary {
    #[serde(flatten)]
    pub class: Class,
    pub student_count: usize,
}

impl From<Class> for ClassSummary {
    fn from(class: Class) -> Self {
        let student_count = class.student_count();
        Self {
            class,
            student_count,
        }
    }
}
