use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 出勤状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    Excused,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Absent => "Absent",
            AttendanceStatus::Late => "Late",
            AttendanceStatus::Excused => "Excused",
        }
    }
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "present" => Ok(AttendanceStatus::Present),
            "absent" => Ok(AttendanceStatus::Absent),
            "late" => Ok(AttendanceStatus::Late),
            "excused" => Ok(AttendanceStatus::Excused),
            _ => Err(format!("Invalid attendance status: {s}")),
        }
    }
}

// 考勤记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attendance {
    pub id: String,
    pub student_id: String,
    pub student_name: String,
    pub class_id: String,
    pub class_name: String,
    pub date: DateTime<Utc>,
    pub status: AttendanceStatus,
    pub remarks: String,
    pub recorded_by: String,
    pub recorded_at: DateTime<Utc>,
}

impl Attendance {
    /// 同一班级、同一学生、同一天只保留一条记录，重复点名覆盖旧记录
    pub fn roll_call_id(class_id: &str, student_id: &str, date: DateTime<Utc>) -> String {
        format!("{}-{}-{}", class_id, student_id, date.format("%Y-%m-%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_roll_call_id_ignores_time_of_day() {
        let morning = Utc.with_ymd_and_hms(2024, 3, 4, 8, 0, 0).unwrap();
        let evening = Utc.with_ymd_and_hms(2024, 3, 4, 19, 30, 0).unwrap();
        assert_eq!(Attendance::roll_call_id("10A", "s1", morning), "10A-s1-2024-03-04");
        assert_eq!(
            Attendance::roll_call_id("10A", "s1", morning),
            Attendance::roll_call_id("10A", "s1", evening)
        );
    }
}
