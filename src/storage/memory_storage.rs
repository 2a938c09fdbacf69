//! 内存存储，仅用于服务层测试
//!
//! 行为与 Firestore 实现保持一致（分班同步名单、删除级联），
//! 另外可以让指定学生的成绩/考勤查询失败，以及让所有列表查询失败。

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;

use super::Storage;
use crate::errors::{Result, SchoolError};
use crate::firestore::FirestoreDocument;
use crate::models::{
    attendance::entities::Attendance, classes::entities::Class, grades::entities::Grade,
    students::entities::StudentProfile, teachers::entities::TeacherProfile,
    users::entities::UserProfile,
};
use crate::storage::firestore_storage::{hand_over_class, move_student};

#[derive(Default)]
pub struct MemoryStorage {
    users: Mutex<BTreeMap<String, UserProfile>>,
    students: Mutex<BTreeMap<String, StudentProfile>>,
    teachers: Mutex<BTreeMap<String, TeacherProfile>>,
    classes: Mutex<BTreeMap<String, Class>>,
    grades: Mutex<BTreeMap<String, Grade>>,
    attendance: Mutex<BTreeMap<String, Attendance>>,
    failing_students: Mutex<HashSet<String>>,
    failing_lists: Mutex<bool>,
}

fn unavailable(what: &str) -> SchoolError {
    SchoolError::firestore_transport(format!("{what}: connection refused"))
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// 该学生的成绩和考勤查询返回上游错误
    pub fn fail_student(&self, student_id: &str) {
        self.failing_students
            .lock()
            .unwrap()
            .insert(student_id.to_string());
    }

    /// 所有列表查询返回上游错误
    pub fn fail_lists(&self) {
        *self.failing_lists.lock().unwrap() = true;
    }

    fn check_lists(&self, what: &str) -> Result<()> {
        if *self.failing_lists.lock().unwrap() {
            return Err(unavailable(what));
        }
        Ok(())
    }

    fn check_student(&self, student_id: &str, what: &str) -> Result<()> {
        if self.failing_students.lock().unwrap().contains(student_id) {
            return Err(unavailable(what));
        }
        Ok(())
    }

    pub fn seed_student(&self, student: StudentProfile) {
        let class_id = student.class_id.clone();
        let id = student.id().to_string();
        self.students.lock().unwrap().insert(id.clone(), student);
        if let Some(class) = self.classes.lock().unwrap().get_mut(&class_id)
            && !class.has_student(&id)
        {
            class.student_ids.push(id);
        }
    }

    pub fn seed_teacher(&self, teacher: TeacherProfile) {
        self.teachers
            .lock()
            .unwrap()
            .insert(teacher.id().to_string(), teacher);
    }

    pub fn seed_class(&self, class: Class) {
        self.classes.lock().unwrap().insert(class.id.clone(), class);
    }

    pub fn seed_grade(&self, mut grade: Grade) {
        grade.recalculate();
        self.grades.lock().unwrap().insert(grade.id.clone(), grade);
    }

    pub fn seed_attendance(&self, record: Attendance) {
        self.attendance
            .lock()
            .unwrap()
            .insert(record.id.clone(), record);
    }

    pub fn seed_hr_user(&self, user: UserProfile) {
        self.users.lock().unwrap().insert(user.id.clone(), user);
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get_hr_user(&self, uid: &str) -> Result<Option<UserProfile>> {
        Ok(self.users.lock().unwrap().get(uid).cloned())
    }

    async fn create_hr_user(&self, mut user: UserProfile) -> Result<UserProfile> {
        user.stamp_for_create(Utc::now());
        self.users
            .lock()
            .unwrap()
            .insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn update_hr_user(&self, mut user: UserProfile) -> Result<UserProfile> {
        user.stamp_for_update(Utc::now());
        self.users
            .lock()
            .unwrap()
            .insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn get_student(&self, id: &str) -> Result<Option<StudentProfile>> {
        Ok(self.students.lock().unwrap().get(id).cloned())
    }

    async fn list_students(&self) -> Result<Vec<StudentProfile>> {
        self.check_lists("list students")?;
        Ok(self.students.lock().unwrap().values().cloned().collect())
    }

    async fn list_students_by_class(&self, class_id: &str) -> Result<Vec<StudentProfile>> {
        self.check_lists("query students")?;
        Ok(self
            .students
            .lock()
            .unwrap()
            .values()
            .filter(|s| s.class_id == class_id)
            .cloned()
            .collect())
    }

    async fn create_student(&self, mut student: StudentProfile) -> Result<StudentProfile> {
        student.stamp_for_create(Utc::now());
        self.students
            .lock()
            .unwrap()
            .insert(student.id().to_string(), student.clone());
        Ok(student)
    }

    async fn update_student(&self, mut student: StudentProfile) -> Result<StudentProfile> {
        student.stamp_for_update(Utc::now());
        self.students
            .lock()
            .unwrap()
            .insert(student.id().to_string(), student.clone());
        Ok(student)
    }

    async fn delete_student(&self, id: &str) -> Result<bool> {
        let Some(student) = self.students.lock().unwrap().remove(id) else {
            return Ok(false);
        };
        if let Some(class) = self.classes.lock().unwrap().get_mut(&student.class_id) {
            class.student_ids.retain(|s| s != id);
        }
        Ok(true)
    }

    async fn get_teacher(&self, id: &str) -> Result<Option<TeacherProfile>> {
        Ok(self.teachers.lock().unwrap().get(id).cloned())
    }

    async fn list_teachers(&self) -> Result<Vec<TeacherProfile>> {
        self.check_lists("list teachers")?;
        Ok(self.teachers.lock().unwrap().values().cloned().collect())
    }

    async fn create_teacher(&self, mut teacher: TeacherProfile) -> Result<TeacherProfile> {
        teacher.stamp_for_create(Utc::now());
        self.teachers
            .lock()
            .unwrap()
            .insert(teacher.id().to_string(), teacher.clone());
        Ok(teacher)
    }

    async fn update_teacher(&self, mut teacher: TeacherProfile) -> Result<TeacherProfile> {
        teacher.stamp_for_update(Utc::now());
        self.teachers
            .lock()
            .unwrap()
            .insert(teacher.id().to_string(), teacher.clone());
        Ok(teacher)
    }

    async fn delete_teacher(&self, id: &str) -> Result<bool> {
        if self.teachers.lock().unwrap().remove(id).is_none() {
            return Ok(false);
        }
        for class in self.classes.lock().unwrap().values_mut() {
            if class.teacher_id == id {
                class.teacher_id.clear();
                class.teacher_name.clear();
            }
        }
        Ok(true)
    }

    async fn get_class(&self, id: &str) -> Result<Option<Class>> {
        Ok(self.classes.lock().unwrap().get(id).cloned())
    }

    async fn list_classes(&self) -> Result<Vec<Class>> {
        self.check_lists("list classes")?;
        Ok(self.classes.lock().unwrap().values().cloned().collect())
    }

    async fn create_class(&self, mut class: Class) -> Result<Class> {
        class.stamp_for_create(Utc::now());
        self.classes
            .lock()
            .unwrap()
            .insert(class.id.clone(), class.clone());
        Ok(class)
    }

    async fn update_class(&self, mut class: Class) -> Result<Class> {
        class.stamp_for_update(Utc::now());
        self.classes
            .lock()
            .unwrap()
            .insert(class.id.clone(), class.clone());
        Ok(class)
    }

    async fn delete_class(&self, id: &str) -> Result<bool> {
        let Some(class) = self.classes.lock().unwrap().remove(id) else {
            return Ok(false);
        };
        for student in self.students.lock().unwrap().values_mut() {
            if student.class_id == id {
                student.class_id.clear();
            }
        }
        if let Some(teacher) = self.teachers.lock().unwrap().get_mut(&class.teacher_id) {
            teacher.classes.retain(|c| c != id);
        }
        Ok(true)
    }

    async fn assign_student_to_class(
        &self,
        student_id: &str,
        class_id: &str,
    ) -> Result<Option<Class>> {
        let mut students = self.students.lock().unwrap();
        let mut classes = self.classes.lock().unwrap();
        let (Some(student), Some(mut class)) =
            (students.get_mut(student_id), classes.get(class_id).cloned())
        else {
            return Ok(None);
        };

        if let Some(previous) = move_student(student, &mut class)
            && let Some(old) = classes.get_mut(&previous)
        {
            old.student_ids.retain(|s| s != student_id);
        }
        classes.insert(class.id.clone(), class.clone());
        Ok(Some(class))
    }

    async fn assign_teacher_to_class(
        &self,
        teacher_id: &str,
        class_id: &str,
    ) -> Result<Option<Class>> {
        let mut teachers = self.teachers.lock().unwrap();
        let mut classes = self.classes.lock().unwrap();
        let (Some(mut teacher), Some(class)) =
            (teachers.get(teacher_id).cloned(), classes.get_mut(class_id))
        else {
            return Ok(None);
        };

        let previous = hand_over_class(&mut teacher, class);
        let class = class.clone();
        teachers.insert(teacher_id.to_string(), teacher);
        if let Some(previous) = previous
            && let Some(old) = teachers.get_mut(&previous)
        {
            old.classes.retain(|c| c != class_id);
        }
        Ok(Some(class))
    }

    async fn get_grade(&self, id: &str) -> Result<Option<Grade>> {
        Ok(self.grades.lock().unwrap().get(id).cloned())
    }

    async fn list_grades_by_student(&self, student_id: &str) -> Result<Vec<Grade>> {
        self.check_student(student_id, "query grades")?;
        Ok(self
            .grades
            .lock()
            .unwrap()
            .values()
            .filter(|g| g.student_id == student_id)
            .cloned()
            .collect())
    }

    async fn list_grades_by_teacher(&self, teacher_id: &str) -> Result<Vec<Grade>> {
        self.check_lists("query grades")?;
        Ok(self
            .grades
            .lock()
            .unwrap()
            .values()
            .filter(|g| g.teacher_id == teacher_id)
            .cloned()
            .collect())
    }

    async fn create_grade(&self, mut grade: Grade) -> Result<Grade> {
        grade.recalculate();
        grade.stamp_for_create(Utc::now());
        self.grades
            .lock()
            .unwrap()
            .insert(grade.id.clone(), grade.clone());
        Ok(grade)
    }

    async fn update_grade(&self, mut grade: Grade) -> Result<Grade> {
        grade.recalculate();
        grade.stamp_for_update(Utc::now());
        self.grades
            .lock()
            .unwrap()
            .insert(grade.id.clone(), grade.clone());
        Ok(grade)
    }

    async fn list_attendance_by_class(&self, class_id: &str) -> Result<Vec<Attendance>> {
        self.check_lists("query attendance")?;
        Ok(self
            .attendance
            .lock()
            .unwrap()
            .values()
            .filter(|a| a.class_id == class_id)
            .cloned()
            .collect())
    }

    async fn list_attendance_by_student(&self, student_id: &str) -> Result<Vec<Attendance>> {
        self.check_student(student_id, "query attendance")?;
        let mut records: Vec<Attendance> = self
            .attendance
            .lock()
            .unwrap()
            .values()
            .filter(|a| a.student_id == student_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(records)
    }

    async fn record_attendance(&self, mut records: Vec<Attendance>) -> Result<Vec<Attendance>> {
        let now = Utc::now();
        let mut stored = self.attendance.lock().unwrap();
        for record in records.iter_mut() {
            record.stamp_for_create(now);
            stored.insert(record.id.clone(), record.clone());
        }
        Ok(records)
    }
}
