//! 班级成绩报告

use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};

use super::attendance::summarize_students;
use super::rollups::{mean_attendance, mean_score, score_pass_rate};
use crate::models::attendance::entities::Attendance;
use crate::models::classes::entities::{Class, ClassSummary};
use crate::models::grades::entities::{Grade, LETTERS, letter_for_score};
use crate::models::reports::responses::{
    ClassPerformanceReport, ConcernLevel, GradeDistributionEntry, StudentRanking,
    SubjectPerformance,
};
use crate::models::students::entities::StudentProfile;
use crate::utils::math::{percentage, round_to};

/// 各科统计，按科目名排序
pub fn subject_performance(grades: &[Grade]) -> Vec<SubjectPerformance> {
    let mut by_subject: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for grade in grades {
        by_subject
            .entry(grade.subject.as_str())
            .or_default()
            .push(grade.total_score);
    }

    by_subject
        .into_iter()
        .map(|(subject, scores)| SubjectPerformance {
            subject: subject.to_string(),
            average_score: mean_score(&scores),
            highest_score: scores.iter().copied().fold(f64::MIN, f64::max),
            lowest_score: scores.iter().copied().fold(f64::MAX, f64::min),
            pass_rate: score_pass_rate(&scores),
            grade_count: scores.len(),
        })
        .collect()
}

/// 五档等级分布，固定 A..F 顺序，没有成绩的档位计 0
pub fn grade_distribution(grades: &[Grade]) -> Vec<GradeDistributionEntry> {
    LETTERS
        .iter()
        .map(|letter| {
            let count = grades
                .iter()
                .filter(|g| letter_for_score(g.total_score) == *letter)
                .count();
            GradeDistributionEntry {
                letter: letter.to_string(),
                count,
                percentage: percentage(count, grades.len())
                    .map(|v| round_to(v, 1))
                    .unwrap_or(0.0),
            }
        })
        .collect()
}

/// 按平均分排名，同分保持输入顺序；没有成绩的学生平均分计 0
pub fn rank_students(students: &[StudentProfile], grades: &[Grade]) -> Vec<StudentRanking> {
    let mut scores: HashMap<&str, Vec<f64>> = HashMap::new();
    for grade in grades {
        scores
            .entry(grade.student_id.as_str())
            .or_default()
            .push(grade.total_score);
    }

    let mut rankings: Vec<StudentRanking> = students
        .iter()
        .map(|s| {
            let own = scores.get(s.id()).map(Vec::as_slice).unwrap_or_default();
            let average_score = mean_score(own);
            StudentRanking {
                rank: 0,
                student_id: s.id().to_string(),
                student_name: s.full_name().to_string(),
                average_score,
                letter_grade: letter_for_score(average_score).to_string(),
                grade_count: own.len(),
            }
        })
        .collect();

    rankings.sort_by(|a, b| b.average_score.total_cmp(&a.average_score));
    for (i, ranking) in rankings.iter_mut().enumerate() {
        ranking.rank = i + 1;
    }
    rankings
}

/// 汇总班级成绩报告
///
/// 班级均分和及格率只统计有成绩的学生；
/// 考勤关注名单只列出非 normal 的学生。
pub fn build_class_report(
    class: Class,
    students: &[StudentProfile],
    grades: &[Grade],
    attendance: &[Attendance],
    data_complete: bool,
    generated_at: DateTime<Utc>,
) -> ClassPerformanceReport {
    let rankings = rank_students(students, grades);
    let graded: Vec<f64> = rankings
        .iter()
        .filter(|r| r.grade_count > 0)
        .map(|r| r.average_score)
        .collect();

    let mut attendance_concerns: Vec<_> = summarize_students(students, attendance)
        .into_iter()
        .filter(|s| s.concern_level != ConcernLevel::Normal)
        .collect();
    attendance_concerns.sort_by(|a, b| b.concern_level.cmp(&a.concern_level));

    ClassPerformanceReport {
        class: ClassSummary::from(class),
        generated_at,
        student_count: students.len(),
        class_average: mean_score(&graded),
        pass_rate: score_pass_rate(&graded),
        average_attendance: mean_attendance(students),
        subjects: subject_performance(grades),
        grade_distribution: grade_distribution(grades),
        rankings,
        attendance_concerns,
        data_complete,
    }
}
