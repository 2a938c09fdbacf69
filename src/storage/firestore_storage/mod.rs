//! Firestore 存储实现
//!
//! 每个集合一个文件提供 `*_impl` 方法，这里统一实现 `Storage` trait。
//! 错误原样向上返回，降级策略由服务层决定。

mod attendance;
mod classes;
mod grades;
mod students;
mod teachers;
mod users;

pub(crate) use classes::{hand_over_class, move_student};

use async_trait::async_trait;
use tracing::info;

use crate::config::FirebaseConfig;
use crate::errors::Result;
use crate::firestore::FirestoreClient;
use crate::models::{
    attendance::entities::Attendance, classes::entities::Class, grades::entities::Grade,
    students::entities::StudentProfile, teachers::entities::TeacherProfile,
    users::entities::UserProfile,
};
use crate::storage::Storage;

#[derive(Clone)]
pub struct FirestoreStorage {
    pub(crate) client: FirestoreClient,
}

impl FirestoreStorage {
    pub fn new(config: &FirebaseConfig) -> Result<Self> {
        let client = FirestoreClient::new(config)?;
        info!(
            "Firestore 存储初始化完成，项目: {}，数据库: {}",
            config.project_id, config.database_id
        );
        Ok(Self { client })
    }
}

#[async_trait]
impl Storage for FirestoreStorage {
    // 教务用户
    async fn get_hr_user(&self, uid: &str) -> Result<Option<UserProfile>> {
        self.get_hr_user_impl(uid).await
    }

    async fn create_hr_user(&self, user: UserProfile) -> Result<UserProfile> {
        self.create_hr_user_impl(user).await
    }

    async fn update_hr_user(&self, user: UserProfile) -> Result<UserProfile> {
        self.update_hr_user_impl(user).await
    }

    // 学生
    async fn get_student(&self, id: &str) -> Result<Option<StudentProfile>> {
        self.get_student_impl(id).await
    }

    async fn list_students(&self) -> Result<Vec<StudentProfile>> {
        self.list_students_impl().await
    }

    async fn list_students_by_class(&self, class_id: &str) -> Result<Vec<StudentProfile>> {
        self.list_students_by_class_impl(class_id).await
    }

    async fn create_student(&self, student: StudentProfile) -> Result<StudentProfile> {
        self.create_student_impl(student).await
    }

    async fn update_student(&self, student: StudentProfile) -> Result<StudentProfile> {
        self.update_student_impl(student).await
    }

    async fn delete_student(&self, id: &str) -> Result<bool> {
        self.delete_student_impl(id).await
    }

    // 教师
    async fn get_teacher(&self, id: &str) -> Result<Option<TeacherProfile>> {
        self.get_teacher_impl(id).await
    }

    async fn list_teachers(&self) -> Result<Vec<TeacherProfile>> {
        self.list_teachers_impl().await
    }

    async fn create_teacher(&self, teacher: TeacherProfile) -> Result<TeacherProfile> {
        self.create_teacher_impl(teacher).await
    }

    async fn update_teacher(&self, teacher: TeacherProfile) -> Result<TeacherProfile> {
        self.update_teacher_impl(teacher).await
    }

    async fn delete_teacher(&self, id: &str) -> Result<bool> {
        self.delete_teacher_impl(id).await
    }

    // 班级
    async fn get_class(&self, id: &str) -> Result<Option<Class>> {
        self.get_class_impl(id).await
    }

    async fn list_classes(&self) -> Result<Vec<Class>> {
        self.list_classes_impl().await
    }

    async fn create_class(&self, class: Class) -> Result<Class> {
        self.create_class_impl(class).await
    }

    async fn update_class(&self, class: Class) -> Result<Class> {
        self.update_class_impl(class).await
    }

    async fn delete_class(&self, id: &str) -> Result<bool> {
        self.delete_class_impl(id).await
    }

    async fn assign_student_to_class(
        &self,
        student_id: &str,
        class_id: &str,
    ) -> Result<Option<Class>> {
        self.assign_student_to_class_impl(student_id, class_id).await
    }

    async fn assign_teacher_to_class(
        &self,
        teacher_id: &str,
        class_id: &str,
    ) -> Result<Option<Class>> {
        self.assign_teacher_to_class_impl(teacher_id, class_id).await
    }

    // 成绩
    async fn get_grade(&self, id: &str) -> Result<Option<Grade>> {
        self.get_grade_impl(id).await
    }

    async fn list_grades_by_student(&self, student_id: &str) -> Result<Vec<Grade>> {
        self.list_grades_by_student_impl(student_id).await
    }

    async fn list_grades_by_teacher(&self, teacher_id: &str) -> Result<Vec<Grade>> {
        self.list_grades_by_teacher_impl(teacher_id).await
    }

    async fn create_grade(&self, grade: Grade) -> Result<Grade> {
        self.create_grade_impl(grade).await
    }

    async fn update_grade(&self, grade: Grade) -> Result<Grade> {
        self.update_grade_impl(grade).await
    }

    // 考勤
    async fn list_attendance_by_class(&self, class_id: &str) -> Result<Vec<Attendance>> {
        self.list_attendance_by_class_impl(class_id).await
    }

    async fn list_attendance_by_student(&self, student_id: &str) -> Result<Vec<Attendance>> {
        self.list_attendance_by_student_impl(student_id).await
    }

    async fn record_attendance(&self, records: Vec<Attendance>) -> Result<Vec<Attendance>> {
        self.record_attendance_impl(records).await
    }
}
