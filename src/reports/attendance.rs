//! 考勤分析
//!
//! 出勤率 = (出勤 + 迟到) / (总数 - 请假)，无有效记录时视为 100。
//! 连续缺勤从最近一条记录往前数：请假跳过，出勤或迟到中断。

use std::collections::HashMap;

use crate::models::attendance::entities::{Attendance, AttendanceStatus};
use crate::models::classes::entities::Class;
use crate::models::reports::responses::{AttendanceAnalysis, AttendanceSummary, ConcernLevel};
use crate::models::students::entities::{DEFAULT_ATTENDANCE_PERCENTAGE, StudentProfile};

pub const CRITICAL_ATTENDANCE: i32 = 70;
pub const WARNING_ATTENDANCE: i32 = 80;
pub const CRITICAL_ABSENCE_STREAK: usize = 5;
pub const WARNING_ABSENCE_STREAK: usize = 3;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct StatusCounts {
    present: usize,
    absent: usize,
    late: usize,
    excused: usize,
}

impl StatusCounts {
    fn tally<'a>(records: impl IntoIterator<Item = &'a Attendance>) -> Self {
        let mut counts = Self::default();
        for record in records {
            match record.status {
                AttendanceStatus::Present => counts.present += 1,
                AttendanceStatus::Absent => counts.absent += 1,
                AttendanceStatus::Late => counts.late += 1,
                AttendanceStatus::Excused => counts.excused += 1,
            }
        }
        counts
    }

    fn total(&self) -> usize {
        self.present + self.absent + self.late + self.excused
    }

    fn percentage(&self) -> i32 {
        let counted = self.total() - self.excused;
        if counted == 0 {
            return DEFAULT_ATTENDANCE_PERCENTAGE;
        }
        ((self.present + self.late) as f64 * 100.0 / counted as f64).round() as i32
    }
}

pub fn attendance_percentage(records: &[Attendance]) -> i32 {
    StatusCounts::tally(records).percentage()
}

pub fn consecutive_absences(records: &[Attendance]) -> usize {
    let mut ordered: Vec<&Attendance> = records.iter().collect();
    ordered.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| b.recorded_at.cmp(&a.recorded_at))
    });

    let mut streak = 0;
    for record in ordered {
        match record.status {
            AttendanceStatus::Absent => streak += 1,
            AttendanceStatus::Excused => continue,
            AttendanceStatus::Present | AttendanceStatus::Late => break,
        }
    }
    streak
}

pub fn concern_level(attendance_percentage: i32, consecutive_absences: usize) -> ConcernLevel {
    if attendance_percentage < CRITICAL_ATTENDANCE
        || consecutive_absences >= CRITICAL_ABSENCE_STREAK
    {
        ConcernLevel::Critical
    } else if attendance_percentage < WARNING_ATTENDANCE
        || consecutive_absences >= WARNING_ABSENCE_STREAK
    {
        ConcernLevel::Warning
    } else {
        ConcernLevel::Normal
    }
}

/// 单个学生的考勤汇总，records 只应包含该学生的记录
pub fn summarize_attendance(
    student_id: &str,
    student_name: &str,
    records: &[Attendance],
) -> AttendanceSummary {
    let counts = StatusCounts::tally(records);
    let attendance_percentage = counts.percentage();
    let consecutive_absences = consecutive_absences(records);

    AttendanceSummary {
        student_id: student_id.to_string(),
        student_name: student_name.to_string(),
        total_records: counts.total(),
        present: counts.present,
        absent: counts.absent,
        late: counts.late,
        excused: counts.excused,
        attendance_percentage,
        consecutive_absences,
        concern_level: concern_level(attendance_percentage, consecutive_absences),
    }
}

/// 按学生汇总考勤，顺序与 students 一致
pub fn summarize_students(
    students: &[StudentProfile],
    records: &[Attendance],
) -> Vec<AttendanceSummary> {
    let mut by_student: HashMap<&str, Vec<Attendance>> = HashMap::new();
    for record in records {
        by_student
            .entry(record.student_id.as_str())
            .or_default()
            .push(record.clone());
    }

    students
        .iter()
        .map(|s| {
            let own = by_student.get(s.id()).map(Vec::as_slice).unwrap_or_default();
            summarize_attendance(s.id(), s.full_name(), own)
        })
        .collect()
}

/// 班级考勤分析，学生按关注等级从高到低排列
pub fn analyze_class_attendance(
    class: &Class,
    students: &[StudentProfile],
    records: &[Attendance],
    data_complete: bool,
) -> AttendanceAnalysis {
    let counts = StatusCounts::tally(records);
    let mut summaries = summarize_students(students, records);
    summaries.sort_by(|a, b| b.concern_level.cmp(&a.concern_level));

    let level_count = |level: ConcernLevel| {
        summaries
            .iter()
            .filter(|s| s.concern_level == level)
            .count()
    };
    let warning_count = level_count(ConcernLevel::Warning);
    let critical_count = level_count(ConcernLevel::Critical);

    AttendanceAnalysis {
        class_id: class.id.clone(),
        class_name: class.name.clone(),
        total_records: counts.total(),
        present: counts.present,
        absent: counts.absent,
        late: counts.late,
        excused: counts.excused,
        overall_attendance_rate: counts.percentage(),
        students: summaries,
        warning_count,
        critical_count,
        data_complete,
    }
}
