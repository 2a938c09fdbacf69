use serde::Serialize;

use super::entities::TeacherProfile;

// 教务新增教师的响应，附带一次性初始密码
#[derive(Debug, Serialize)]
pub struct CreatedTeacherResponse {
    pub teacher: TeacherProfile,
    pub temporary_password: String,
}
