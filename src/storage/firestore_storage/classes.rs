//! 班级存储操作
//!
//! 分班和指派教师会同时改动多份文档，统一走 commit 保证原子性。
//! 读取端以学生档案的 class_id 为准，班级名单随之同步。

use chrono::Utc;

use super::FirestoreStorage;
use crate::errors::Result;
use crate::firestore::{FirestoreDocument, Value};
use crate::models::classes::entities::Class;
use crate::models::students::entities::StudentProfile;
use crate::models::teachers::entities::TeacherProfile;

/// 学生转入 `target`；返回需要同步移除该学生的原班级 ID
pub(crate) fn move_student(student: &mut StudentProfile, target: &mut Class) -> Option<String> {
    let previous = std::mem::replace(&mut student.class_id, target.id.clone());
    if !target.has_student(student.id()) {
        target.student_ids.push(student.id().to_string());
    }
    (!previous.is_empty() && previous != target.id).then_some(previous)
}

/// 教师接手 `target`；返回需要同步移除该班级的原任课教师 ID
pub(crate) fn hand_over_class(teacher: &mut TeacherProfile, target: &mut Class) -> Option<String> {
    let previous = std::mem::replace(&mut target.teacher_id, teacher.id().to_string());
    target.teacher_name = teacher.full_name().to_string();
    if !teacher.teaches_class(&target.id) {
        teacher.classes.push(target.id.clone());
    }
    (!previous.is_empty() && previous != teacher.id()).then_some(previous)
}

impl FirestoreStorage {
    pub async fn get_class_impl(&self, id: &str) -> Result<Option<Class>> {
        self.client.get::<Class>(id).await
    }

    pub async fn list_classes_impl(&self) -> Result<Vec<Class>> {
        self.client.list::<Class>().await
    }

    pub async fn create_class_impl(&self, mut class: Class) -> Result<Class> {
        self.client.create(&mut class).await?;
        Ok(class)
    }

    pub async fn update_class_impl(&self, mut class: Class) -> Result<Class> {
        self.client.update(&mut class).await?;
        Ok(class)
    }

    pub async fn delete_class_impl(&self, id: &str) -> Result<bool> {
        let Some(class) = self.get_class_impl(id).await? else {
            return Ok(false);
        };

        let now = Utc::now();
        let mut writes = vec![self.client.delete_write::<Class>(id)];

        let students = self
            .client
            .query::<StudentProfile>("classId", Value::string(id), None)
            .await?;
        for mut student in students {
            student.class_id.clear();
            student.stamp_for_update(now);
            writes.push(self.client.update_write(&student));
        }

        if !class.teacher_id.is_empty()
            && let Some(mut teacher) = self.client.get::<TeacherProfile>(&class.teacher_id).await?
        {
            teacher.classes.retain(|c| c != id);
            teacher.stamp_for_update(now);
            writes.push(self.client.update_write(&teacher));
        }

        self.client.commit(&writes).await?;
        Ok(true)
    }

    pub async fn assign_student_to_class_impl(
        &self,
        student_id: &str,
        class_id: &str,
    ) -> Result<Option<Class>> {
        let Some(mut student) = self.client.get::<StudentProfile>(student_id).await? else {
            return Ok(None);
        };
        let Some(mut class) = self.get_class_impl(class_id).await? else {
            return Ok(None);
        };

        let now = Utc::now();
        let previous = move_student(&mut student, &mut class);
        student.stamp_for_update(now);
        class.stamp_for_update(now);

        let mut writes = vec![
            self.client.update_write(&student),
            self.client.update_write(&class),
        ];
        if let Some(previous_id) = previous
            && let Some(mut old_class) = self.get_class_impl(&previous_id).await?
        {
            old_class.student_ids.retain(|s| s != student_id);
            old_class.stamp_for_update(now);
            writes.push(self.client.update_write(&old_class));
        }

        self.client.commit(&writes).await?;
        Ok(Some(class))
    }

    pub async fn assign_teacher_to_class_impl(
        &self,
        teacher_id: &str,
        class_id: &str,
    ) -> Result<Option<Class>> {
        let Some(mut teacher) = self.client.get::<TeacherProfile>(teacher_id).await? else {
            return Ok(None);
        };
        let Some(mut class) = self.get_class_impl(class_id).await? else {
            return Ok(None);
        };

        let now = Utc::now();
        let previous = hand_over_class(&mut teacher, &mut class);
        teacher.stamp_for_update(now);
        class.stamp_for_update(now);

        let mut writes = vec![
            self.client.update_write(&teacher),
            self.client.update_write(&class),
        ];
        if let Some(previous_id) = previous
            && let Some(mut old_teacher) = self.client.get::<TeacherProfile>(&previous_id).await?
        {
            old_teacher.classes.retain(|c| c != class_id);
            old_teacher.stamp_for_update(now);
            writes.push(self.client.update_write(&old_teacher));
        }

        self.client.commit(&writes).await?;
        Ok(Some(class))
    }
}
