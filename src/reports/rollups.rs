//! 汇总统计
//!
//! 空集合时各指标都有固定默认值，调用方不需要再判空。

use crate::models::students::entities::{DEFAULT_ATTENDANCE_PERCENTAGE, StudentProfile};
use crate::models::grades::entities::{Grade, SCORE_PASS_THRESHOLD};
use crate::utils::math::{percentage, round_to};

/// GPA 及格线（4 分制）
pub const GPA_PASS_THRESHOLD: f64 = 2.0;

fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// 平均 GPA，两位小数，空集合为 0
pub fn mean_gpa(students: &[StudentProfile]) -> f64 {
    mean(students.iter().map(|s| s.gpa))
        .map(|v| round_to(v, 2))
        .unwrap_or(0.0)
}

/// 平均出勤率，取整，空集合为 100
pub fn mean_attendance(students: &[StudentProfile]) -> i32 {
    mean(students.iter().map(|s| f64::from(s.attendance_percentage)))
        .map(|v| v.round() as i32)
        .unwrap_or(DEFAULT_ATTENDANCE_PERCENTAGE)
}

/// 平均分，两位小数，空集合为 0
pub fn mean_score(scores: &[f64]) -> f64 {
    mean(scores.iter().copied())
        .map(|v| round_to(v, 2))
        .unwrap_or(0.0)
}

/// GPA 及格率（百分比，两位小数）
pub fn gpa_pass_rate(students: &[StudentProfile]) -> f64 {
    let passed = students
        .iter()
        .filter(|s| s.gpa >= GPA_PASS_THRESHOLD)
        .count();
    percentage(passed, students.len())
        .map(|v| round_to(v, 2))
        .unwrap_or(0.0)
}

/// 成绩及格率（百分比，一位小数）
pub fn score_pass_rate(scores: &[f64]) -> f64 {
    let passed = scores.iter().filter(|s| **s >= SCORE_PASS_THRESHOLD).count();
    percentage(passed, scores.len())
        .map(|v| round_to(v, 1))
        .unwrap_or(0.0)
}

/// 由成绩推算 GPA：A=4 B=3 C=2 D=1 F=0，取平均，两位小数；没有成绩时为 None
pub fn gpa_from_grades(grades: &[Grade]) -> Option<f64> {
    mean(grades.iter().map(|g| match g.letter_grade.as_str() {
        "A" => 4.0,
        "B" => 3.0,
        "C" => 2.0,
        "D" => 1.0,
        _ => 0.0,
    }))
    .map(|v| round_to(v, 2))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(gpa: f64, attendance: i32) -> StudentProfile {
        let mut s = StudentProfile::new("s", "s@school.test", "S");
        s.gpa = gpa;
        s.attendance_percentage = attendance;
        s
    }

    #[test]
    fn test_empty_defaults() {
        assert_eq!(mean_gpa(&[]), 0.0);
        assert_eq!(mean_attendance(&[]), 100);
        assert_eq!(mean_score(&[]), 0.0);
        assert_eq!(gpa_pass_rate(&[]), 0.0);
        assert_eq!(score_pass_rate(&[]), 0.0);
    }

    #[test]
    fn test_means_are_rounded() {
        let students = vec![student(3.0, 90), student(2.5, 85), student(3.333, 80)];
        assert_eq!(mean_gpa(&students), 2.94);
        assert_eq!(mean_attendance(&students), 85);
        assert_eq!(mean_score(&[70.0, 80.0, 85.555]), 78.52);
    }

    #[test]
    fn test_thresholds_are_inclusive() {
        let students = vec![student(2.0, 100), student(1.99, 100), student(3.9, 100)];
        assert_eq!(gpa_pass_rate(&students), 66.67);
        assert_eq!(score_pass_rate(&[60.0, 59.99, 75.0]), 66.7);
    }

    #[test]
    fn test_gpa_from_letters() {
        let grade = |letter: &str| {
            let now = chrono::Utc::now();
            Grade {
                id: String::new(),
                student_id: "s".to_string(),
                student_name: String::new(),
                teacher_id: "t".to_string(),
                subject: "Math".to_string(),
                term: crate::models::grades::entities::Term::First,
                year: 2024,
                test1: 0.0,
                test2: 0.0,
                exam: 0.0,
                assignment: 0.0,
                total_score: 0.0,
                letter_grade: letter.to_string(),
                remarks: String::new(),
                created_at: now,
                updated_at: now,
            }
        };
        assert_eq!(gpa_from_grades(&[]), None);
        assert_eq!(gpa_from_grades(&[grade("A"), grade("B"), grade("F")]), Some(2.33));
    }
}
