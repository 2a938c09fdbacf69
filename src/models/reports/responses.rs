use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::classes::entities::ClassSummary;
use crate::models::grades::entities::Grade;
use crate::models::students::entities::StudentProfile;

/// 考勤关注等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConcernLevel {
    Normal,
    Warning,
    Critical,
}

/// 单个学生的考勤汇总
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceSummary {
    pub student_id: String,
    pub student_name: String,
    pub total_records: usize,
    pub present: usize,
    pub absent: usize,
    pub late: usize,
    pub excused: usize,
    pub attendance_percentage: i32,
    pub consecutive_absences: usize,
    pub concern_level: ConcernLevel,
}

/// 班级考勤分析
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceAnalysis {
    pub class_id: String,
    pub class_name: String,
    pub total_records: usize,
    pub present: usize,
    pub absent: usize,
    pub late: usize,
    pub excused: usize,
    pub overall_attendance_rate: i32,
    pub students: Vec<AttendanceSummary>,
    pub warning_count: usize,
    pub critical_count: usize,
    pub data_complete: bool,
}

/// 单科表现
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectPerformance {
    pub subject: String,
    pub average_score: f64,
    pub highest_score: f64,
    pub lowest_score: f64,
    pub pass_rate: f64,
    pub grade_count: usize,
}

/// 等级分布
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeDistributionEntry {
    pub letter: String,
    pub count: usize,
    pub percentage: f64,
}

/// 学生排名
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentRanking {
    pub rank: usize,
    pub student_id: String,
    pub student_name: String,
    pub average_score: f64,
    pub letter_grade: String,
    pub grade_count: usize,
}

/// 班级成绩报告
#[derive(Debug, Clone, Serialize)]
pub struct ClassPerformanceReport {
    pub class: ClassSummary,
    pub generated_at: DateTime<Utc>,
    pub student_count: usize,
    pub class_average: f64,
    pub pass_rate: f64,
    pub average_attendance: i32,
    pub subjects: Vec<SubjectPerformance>,
    pub grade_distribution: Vec<GradeDistributionEntry>,
    pub rankings: Vec<StudentRanking>,
    pub attendance_concerns: Vec<AttendanceSummary>,
    pub data_complete: bool,
}

/// 教务仪表盘
#[derive(Debug, Clone, Serialize)]
pub struct HrDashboard {
    pub total_students: usize,
    pub active_students: usize,
    pub total_teachers: usize,
    pub total_classes: usize,
    pub average_student_gpa: f64,
    pub average_student_attendance: i32,
    pub gpa_pass_rate: f64,
    pub students_by_grade_level: BTreeMap<String, usize>,
    pub teachers_by_department: BTreeMap<String, usize>,
    pub recent_students: Vec<StudentProfile>,
    pub data_complete: bool,
}

/// 教务统计小部件
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HrStats {
    pub total_students: usize,
    pub total_teachers: usize,
    pub total_classes: usize,
    pub average_student_gpa: f64,
    pub average_student_attendance: i32,
}

impl From<&HrDashboard> for HrStats {
    fn from(dashboard: &HrDashboard) -> Self {
        Self {
            total_students: dashboard.total_students,
            total_teachers: dashboard.total_teachers,
            total_classes: dashboard.total_classes,
            average_student_gpa: dashboard.average_student_gpa,
            average_student_attendance: dashboard.average_student_attendance,
        }
    }
}

/// 需要关注的学生
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AtRiskStudent {
    pub student_id: String,
    pub student_name: String,
    pub class_id: String,
    pub gpa: f64,
    pub attendance_percentage: i32,
    pub concern_level: ConcernLevel,
    pub reasons: Vec<String>,
}

/// 教师仪表盘
#[derive(Debug, Clone, Serialize)]
pub struct TeacherDashboard {
    pub teacher_name: String,
    pub total_students: usize,
    pub total_classes: usize,
    pub average_student_gpa: f64,
    pub average_student_attendance: i32,
    pub classes: Vec<ClassSummary>,
    pub at_risk_students: Vec<AtRiskStudent>,
    pub recent_grades: Vec<Grade>,
    pub data_complete: bool,
}
