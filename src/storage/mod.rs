use std::sync::Arc;

use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::{
    attendance::entities::Attendance, classes::entities::Class, grades::entities::Grade,
    students::entities::StudentProfile, teachers::entities::TeacherProfile,
    users::entities::UserProfile,
};

pub mod firestore_storage;
#[cfg(test)]
pub mod memory_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 教务用户（users 集合）
    async fn get_hr_user(&self, uid: &str) -> Result<Option<UserProfile>>;
    async fn create_hr_user(&self, user: UserProfile) -> Result<UserProfile>;
    async fn update_hr_user(&self, user: UserProfile) -> Result<UserProfile>;

    /// 学生档案
    async fn get_student(&self, id: &str) -> Result<Option<StudentProfile>>;
    async fn list_students(&self) -> Result<Vec<StudentProfile>>;
    // 按 class_id 查询班级学生
    async fn list_students_by_class(&self, class_id: &str) -> Result<Vec<StudentProfile>>;
    async fn create_student(&self, student: StudentProfile) -> Result<StudentProfile>;
    async fn update_student(&self, student: StudentProfile) -> Result<StudentProfile>;
    // 同时把学生从所在班级名单中移除
    async fn delete_student(&self, id: &str) -> Result<bool>;

    /// 教师档案
    async fn get_teacher(&self, id: &str) -> Result<Option<TeacherProfile>>;
    async fn list_teachers(&self) -> Result<Vec<TeacherProfile>>;
    async fn create_teacher(&self, teacher: TeacherProfile) -> Result<TeacherProfile>;
    async fn update_teacher(&self, teacher: TeacherProfile) -> Result<TeacherProfile>;
    // 同时清空其所带班级的任课教师
    async fn delete_teacher(&self, id: &str) -> Result<bool>;

    /// 班级
    async fn get_class(&self, id: &str) -> Result<Option<Class>>;
    async fn list_classes(&self) -> Result<Vec<Class>>;
    async fn create_class(&self, class: Class) -> Result<Class>;
    async fn update_class(&self, class: Class) -> Result<Class>;
    // 同时清理学生的 class_id 和教师的班级列表
    async fn delete_class(&self, id: &str) -> Result<bool>;
    // 分班：学生档案、新旧班级名单在一次提交中更新；学生或班级不存在时返回 None
    async fn assign_student_to_class(
        &self,
        student_id: &str,
        class_id: &str,
    ) -> Result<Option<Class>>;
    // 指派任课教师：教师班级列表、原任课教师、班级在一次提交中更新
    async fn assign_teacher_to_class(
        &self,
        teacher_id: &str,
        class_id: &str,
    ) -> Result<Option<Class>>;

    /// 成绩
    async fn get_grade(&self, id: &str) -> Result<Option<Grade>>;
    async fn list_grades_by_student(&self, student_id: &str) -> Result<Vec<Grade>>;
    async fn list_grades_by_teacher(&self, teacher_id: &str) -> Result<Vec<Grade>>;
    async fn create_grade(&self, grade: Grade) -> Result<Grade>;
    async fn update_grade(&self, grade: Grade) -> Result<Grade>;

    /// 考勤
    async fn list_attendance_by_class(&self, class_id: &str) -> Result<Vec<Attendance>>;
    async fn list_attendance_by_student(&self, student_id: &str) -> Result<Vec<Attendance>>;
    // 一次点名的所有记录原子写入
    async fn record_attendance(&self, records: Vec<Attendance>) -> Result<Vec<Attendance>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = firestore_storage::FirestoreStorage::new(&AppConfig::get().firebase)?;
    Ok(Arc::new(storage))
}
