use serde::Deserialize;

use crate::models::users::entities::UserRole;

// 用户登录请求（来自HTTP请求）
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// 登录入口所选角色，必须与档案中的角色一致
    pub role: UserRole,
}

// 注册请求，学生/教师需要附带对应的档案字段
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: UserRole,
    pub phone: Option<String>,
    // 学生
    pub student_id: Option<String>,
    pub grade_level: Option<String>,
    pub parent_name: Option<String>,
    pub parent_email: Option<String>,
    pub parent_phone: Option<String>,
    // 教师
    pub teacher_id: Option<String>,
    pub department: Option<String>,
    #[serde(default)]
    pub subjects: Vec<String>,
    pub qualification: Option<String>,
}

impl RegisterRequest {
    /// 返回缺失的角色必填字段名
    pub fn missing_role_fields(&self) -> Vec<&'static str> {
        fn blank(value: &Option<String>) -> bool {
            value.as_deref().map(str::trim).unwrap_or_default().is_empty()
        }

        let mut missing = Vec::new();
        match self.role {
            UserRole::Student => {
                if blank(&self.student_id) {
                    missing.push("student_id");
                }
                if blank(&self.parent_name) {
                    missing.push("parent_name");
                }
                if blank(&self.parent_email) {
                    missing.push("parent_email");
                }
            }
            UserRole::Teacher => {
                if blank(&self.teacher_id) {
                    missing.push("teacher_id");
                }
                if blank(&self.department) {
                    missing.push("department");
                }
            }
            UserRole::Hr => {}
        }
        missing
    }
}

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

// 重置密码，oob_code 来自邮件链接
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    #[serde(alias = "oobCode")]
    pub oob_code: String,
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(body: serde_json::Value) -> RegisterRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_student_registration_requires_parent_details() {
        let req = request(json!({
            "email": "a@school.test",
            "password": "secret1",
            "full_name": "Ada",
            "role": "student",
            "student_id": "S-1"
        }));
        assert_eq!(req.missing_role_fields(), vec!["parent_name", "parent_email"]);
    }

    #[test]
    fn test_teacher_registration_requires_department() {
        let req = request(json!({
            "email": "t@school.test",
            "password": "secret1",
            "full_name": "Tom",
            "role": "Teacher",
            "teacher_id": "T-1",
            "department": "  "
        }));
        assert_eq!(req.missing_role_fields(), vec!["department"]);
    }

    #[test]
    fn test_hr_registration_has_no_extra_fields() {
        let req = request(json!({
            "email": "h@school.test",
            "password": "secret1",
            "full_name": "Hana",
            "role": "hr"
        }));
        assert!(req.missing_role_fields().is_empty());
    }
}
