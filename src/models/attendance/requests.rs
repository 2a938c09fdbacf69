use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::entities::AttendanceStatus;

// 班级考勤查询
#[derive(Debug, Deserialize)]
pub struct AttendanceListParams {
    #[serde(alias = "classId")]
    pub class_id: String,
}

// 单个学生的考勤条目
#[derive(Debug, Deserialize)]
pub struct AttendanceEntry {
    pub student_id: String,
    pub status: AttendanceStatus,
    #[serde(default)]
    pub remarks: String,
}

// 批量登记某班某天的考勤
#[derive(Debug, Deserialize)]
pub struct RecordAttendanceRequest {
    pub class_id: String,
    pub date: DateTime<Utc>,
    pub entries: Vec<AttendanceEntry>,
}
