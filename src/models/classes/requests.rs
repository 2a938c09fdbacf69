use serde::Deserialize;

// 创建班级请求
#[derive(Debug, Deserialize)]
pub struct CreateClassRequest {
    pub name: String,
    pub grade_level: Option<String>,
    pub subject: Option<String>,
    pub room: Option<String>,
    pub schedule: Option<String>,
}

// 更新班级请求；教师与学生名单通过分配接口维护
#[derive(Debug, Default, Deserialize)]
pub struct UpdateClassRequest {
    pub name: Option<String>,
    pub grade_level: Option<String>,
    pub subject: Option<String>,
    pub room: Option<String>,
    pub schedule: Option<String>,
}

impl UpdateClassRequest {
    pub fn apply(self, class: &mut super::entities::Class) {
        if let Some(v) = self.name {
            class.name = v;
        }
        if let Some(v) = self.grade_level {
            class.grade_level = v;
        }
        if let Some(v) = self.subject {
            class.subject = v;
        }
        if let Some(v) = self.room {
            class.room = v;
        }
        if let Some(v) = self.schedule {
            class.schedule = v;
        }
    }
}

// 分班请求
#[derive(Debug, Deserialize)]
pub struct AssignStudentRequest {
    pub student_id: String,
}

// 指派任课教师请求
#[derive(Debug, Deserialize)]
pub struct AssignTeacherRequest {
    pub teacher_id: String,
}
