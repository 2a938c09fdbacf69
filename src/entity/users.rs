//! 用户实体（`users` 集合，仅教务人员）
//!
//! 学生和教师档案共用这里的基础字段读写。

use chrono::{DateTime, Utc};

use super::zero_time;
use crate::firestore::{Fields, FirestoreDocument};
use crate::models::users::entities::{DEFAULT_AVATAR_URL, UserProfile, UserRole};

pub(crate) fn write_profile(fields: &mut Fields, profile: &UserProfile) {
    fields
        .string("id", &profile.id)
        .string("email", &profile.email)
        .string("fullName", &profile.full_name)
        .string("phone", &profile.phone)
        .string("role", profile.role.as_str())
        .string("avatarUrl", &profile.avatar_url)
        .optional_timestamp("dateOfBirth", profile.date_of_birth)
        .string("address", &profile.address)
        .timestamp("createdAt", profile.created_at)
        .timestamp("updatedAt", profile.updated_at)
        .boolean("isActive", profile.is_active);
}

/// 角色缺失或无法识别时使用集合对应的角色
pub(crate) fn read_profile(id: &str, fields: &Fields, default_role: UserRole) -> UserProfile {
    UserProfile {
        id: id.to_string(),
        email: fields.get_string("email").unwrap_or_default(),
        full_name: fields.get_string("fullName").unwrap_or_default(),
        phone: fields.get_string("phone").unwrap_or_default(),
        role: fields
            .get_string("role")
            .and_then(|r| r.parse().ok())
            .unwrap_or(default_role),
        avatar_url: fields.string_or("avatarUrl", DEFAULT_AVATAR_URL),
        date_of_birth: fields.get_timestamp("dateOfBirth"),
        address: fields.get_string("address").unwrap_or_default(),
        created_at: fields.get_timestamp("createdAt").unwrap_or_else(zero_time),
        updated_at: fields.get_timestamp("updatedAt").unwrap_or_else(zero_time),
        is_active: fields.get_bool("isActive").unwrap_or(true),
    }
}

impl FirestoreDocument for UserProfile {
    const COLLECTION: &'static str = "users";

    fn document_id(&self) -> &str {
        &self.id
    }

    fn to_fields(&self) -> Fields {
        let mut fields = Fields::new();
        write_profile(&mut fields, self);
        fields
    }

    fn from_fields(id: &str, fields: &Fields) -> Self {
        read_profile(id, fields, UserRole::Hr)
    }

    fn created_at_mut(&mut self) -> Option<&mut DateTime<Utc>> {
        Some(&mut self.created_at)
    }

    fn updated_at_mut(&mut self) -> Option<&mut DateTime<Utc>> {
        Some(&mut self.updated_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_user_round_trip() {
        let mut user = UserProfile::new("u1", "hr@school.test", "Helen", UserRole::Hr);
        user.created_at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        user.updated_at = user.created_at;
        user.date_of_birth = Some(Utc.with_ymd_and_hms(1990, 6, 1, 0, 0, 0).unwrap());

        let parsed = UserProfile::from_fields("u1", &user.to_fields());
        assert_eq!(parsed, user);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let parsed = UserProfile::from_fields("u2", &Fields::new());
        assert_eq!(parsed.id, "u2");
        assert_eq!(parsed.role, UserRole::Hr);
        assert_eq!(parsed.avatar_url, DEFAULT_AVATAR_URL);
        assert!(parsed.is_active);
        assert_eq!(parsed.created_at, zero_time());
        assert_eq!(parsed.date_of_birth, None);
    }

    #[test]
    fn test_role_is_parsed_case_insensitively() {
        let mut fields = Fields::new();
        fields.string("role", "HR");
        assert_eq!(read_profile("x", &fields, UserRole::Student).role, UserRole::Hr);

        fields.string("role", "janitor");
        assert_eq!(
            read_profile("x", &fields, UserRole::Student).role,
            UserRole::Student
        );
    }
}
