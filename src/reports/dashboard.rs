//! 仪表盘

use std::collections::BTreeMap;

use super::attendance::concern_level;
use super::rollups::{GPA_PASS_THRESHOLD, gpa_pass_rate, mean_attendance, mean_gpa};
use super::visibility::visible_students;
use crate::models::classes::entities::{Class, ClassSummary};
use crate::models::grades::entities::Grade;
use crate::models::reports::responses::{
    AtRiskStudent, ConcernLevel, HrDashboard, TeacherDashboard,
};
use crate::models::students::entities::StudentProfile;
use crate::models::teachers::entities::TeacherProfile;

pub fn build_hr_dashboard(
    students: &[StudentProfile],
    teachers: &[TeacherProfile],
    classes: &[Class],
    recent_limit: usize,
    data_complete: bool,
) -> HrDashboard {
    let mut students_by_grade_level = BTreeMap::new();
    for student in students {
        *students_by_grade_level
            .entry(student.grade_level.clone())
            .or_insert(0) += 1;
    }

    let mut teachers_by_department = BTreeMap::new();
    for teacher in teachers {
        *teachers_by_department
            .entry(teacher.department.clone())
            .or_insert(0) += 1;
    }

    let mut recent_students = students.to_vec();
    recent_students.sort_by(|a, b| b.enrollment_date.cmp(&a.enrollment_date));
    recent_students.truncate(recent_limit);

    HrDashboard {
        total_students: students.len(),
        active_students: students.iter().filter(|s| s.profile.is_active).count(),
        total_teachers: teachers.len(),
        total_classes: classes.len(),
        average_student_gpa: mean_gpa(students),
        average_student_attendance: mean_attendance(students),
        gpa_pass_rate: gpa_pass_rate(students),
        students_by_grade_level,
        teachers_by_department,
        recent_students,
        data_complete,
    }
}

/// 出勤率触发关注等级或 GPA 低于及格线的学生
pub fn at_risk_students(students: &[StudentProfile]) -> Vec<AtRiskStudent> {
    students
        .iter()
        .filter_map(|s| {
            let level = concern_level(s.attendance_percentage, 0);
            let mut reasons = Vec::new();
            if level != ConcernLevel::Normal {
                reasons.push(format!("Attendance at {}%", s.attendance_percentage));
            }
            if s.gpa < GPA_PASS_THRESHOLD {
                reasons.push(format!("GPA {:.2} below {GPA_PASS_THRESHOLD:.1}", s.gpa));
            }
            if reasons.is_empty() {
                return None;
            }
            Some(AtRiskStudent {
                student_id: s.id().to_string(),
                student_name: s.full_name().to_string(),
                class_id: s.class_id.clone(),
                gpa: s.gpa,
                attendance_percentage: s.attendance_percentage,
                concern_level: level,
                reasons,
            })
        })
        .collect()
}

/// 教师仪表盘；students 与 classes 可以是全量集合，这里按教师所带班级过滤
pub fn build_teacher_dashboard(
    teacher: &TeacherProfile,
    students: Vec<StudentProfile>,
    classes: Vec<Class>,
    mut grades: Vec<Grade>,
    recent_limit: usize,
    data_complete: bool,
) -> TeacherDashboard {
    let students = visible_students(teacher, students);
    let classes: Vec<ClassSummary> = classes
        .into_iter()
        .filter(|c| teacher.teaches_class(&c.id))
        .map(ClassSummary::from)
        .collect();

    grades.retain(|g| g.teacher_id == teacher.id());
    grades.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    grades.truncate(recent_limit);

    TeacherDashboard {
        teacher_name: teacher.full_name().to_string(),
        total_students: students.len(),
        total_classes: classes.len(),
        average_student_gpa: mean_gpa(&students),
        average_student_attendance: mean_attendance(&students),
        at_risk_students: at_risk_students(&students),
        classes,
        recent_grades: grades,
        data_complete,
    }
}
