//! 教师可见范围
//!
//! 教师只能看到 class_id 落在自己所带班级中的学生。
//! 每次请求都基于刚加载的教师档案重新计算。

use crate::models::students::entities::StudentProfile;
use crate::models::teachers::entities::TeacherProfile;

pub fn can_view_student(teacher: &TeacherProfile, student: &StudentProfile) -> bool {
    !student.class_id.is_empty() && teacher.teaches_class(&student.class_id)
}

pub fn can_view_class(teacher: &TeacherProfile, class_id: &str) -> bool {
    teacher.teaches_class(class_id)
}

pub fn visible_students(
    teacher: &TeacherProfile,
    students: Vec<StudentProfile>,
) -> Vec<StudentProfile> {
    students
        .into_iter()
        .filter(|s| can_view_student(teacher, s))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teacher(classes: &[&str]) -> TeacherProfile {
        let mut t = TeacherProfile::new("t1", "t@school.test", "Tom");
        t.classes = classes.iter().map(|c| c.to_string()).collect();
        t
    }

    fn student(id: &str, class_id: &str) -> StudentProfile {
        let mut s = StudentProfile::new(id, "s@school.test", id);
        s.class_id = class_id.to_string();
        s
    }

    #[test]
    fn test_student_outside_classes_is_hidden() {
        let t = teacher(&["10A"]);
        assert!(can_view_student(&t, &student("s1", "10A")));
        assert!(!can_view_student(&t, &student("s2", "10B")));
    }

    #[test]
    fn test_unassigned_student_is_hidden() {
        let t = teacher(&["10A", ""]);
        assert!(!can_view_student(&t, &student("s1", "")));
    }

    #[test]
    fn test_adding_a_class_never_shrinks_visibility() {
        let students = vec![student("s1", "10A"), student("s2", "10B"), student("s3", "11C")];
        let before = visible_students(&teacher(&["10A"]), students.clone());
        let after = visible_students(&teacher(&["10A", "11C"]), students);

        assert_eq!(before.len(), 1);
        assert_eq!(after.len(), 2);
        assert!(before.iter().all(|b| after.iter().any(|a| a.id() == b.id())));
    }

    #[test]
    fn test_can_view_class() {
        let t = teacher(&["10A"]);
        assert!(can_view_class(&t, "10A"));
        assert!(!can_view_class(&t, "10B"));
    }
}
