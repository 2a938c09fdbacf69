use serde::Serialize;

use super::entities::StudentProfile;
use crate::models::grades::entities::Grade;

// 教务新增学生的响应，附带一次性初始密码
#[derive(Debug, Serialize)]
pub struct CreatedStudentResponse {
    pub student: StudentProfile,
    pub temporary_password: String,
}

// 教师查看学生详情
#[derive(Debug, Serialize)]
pub struct StudentDetailResponse {
    pub student: StudentProfile,
    pub grades: Vec<Grade>,
    pub average_score: f64,
    pub attendance_percentage: i32,
    pub data_complete: bool,
}
