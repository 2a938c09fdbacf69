use serde::Serialize;

use crate::models::students::entities::StudentProfile;
use crate::models::teachers::entities::TeacherProfile;
use crate::models::users::entities::UserProfile;

// 登录/注册成功后的响应
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub expires_in: i64,
    pub user: UserProfile,
}

// 当前登录用户的完整档案，按角色区分集合
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AccountProfile {
    Hr(UserProfile),
    Student(StudentProfile),
    Teacher(TeacherProfile),
}

impl AccountProfile {
    pub fn profile(&self) -> &UserProfile {
        match self {
            AccountProfile::Hr(user) => user,
            AccountProfile::Student(student) => &student.profile,
            AccountProfile::Teacher(teacher) => &teacher.profile,
        }
    }

    pub fn profile_mut(&mut self) -> &mut UserProfile {
        match self {
            AccountProfile::Hr(user) => user,
            AccountProfile::Student(student) => &mut student.profile,
            AccountProfile::Teacher(teacher) => &mut teacher.profile,
        }
    }
}
