use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 未设置头像时使用的占位图
pub const DEFAULT_AVATAR_URL: &str = "/images/default-avatar.png";

// 用户角色
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Student, // 学生
    Teacher, // 教师
    Hr,      // 人事/教务
}

impl UserRole {
    pub const STUDENT: &'static str = "student";
    pub const TEACHER: &'static str = "teacher";
    pub const HR: &'static str = "hr";

    pub fn hr_roles() -> &'static [&'static UserRole] {
        &[&Self::Hr]
    }
    pub fn teacher_roles() -> &'static [&'static UserRole] {
        &[&Self::Teacher]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Student => Self::STUDENT,
            UserRole::Teacher => Self::TEACHER,
            UserRole::Hr => Self::HR,
        }
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的用户角色: '{s}'. 支持的角色: student, teacher, hr"
            ))
        })
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    // 旧数据里角色大小写不统一（"Student"、"HR"）
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            Self::STUDENT => Ok(UserRole::Student),
            Self::TEACHER => Ok(UserRole::Teacher),
            Self::HR => Ok(UserRole::Hr),
            _ => Err(format!("Invalid user role: {s}")),
        }
    }
}

// 用户基础资料，学生/教师档案在此基础上扩展
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub phone: String,
    pub role: UserRole,
    pub avatar_url: String,
    pub date_of_birth: Option<DateTime<Utc>>,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_active: bool,
}

impl UserProfile {
    pub fn new(id: &str, email: &str, full_name: &str, role: UserRole) -> Self {
        let now = Utc::now();
        Self {
            id: id.to_string(),
            email: email.to_string(),
            full_name: full_name.to_string(),
            phone: String::new(),
            role,
            avatar_url: DEFAULT_AVATAR_URL.to_string(),
            date_of_birth: None,
            address: String::new(),
            created_at: now,
            updated_at: now,
            is_active: true,
        }
    }
}

/// 当前请求的登录身份，由 JWT 中间件写入请求扩展
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub uid: String,
    pub email: String,
    pub role: UserRole,
}
