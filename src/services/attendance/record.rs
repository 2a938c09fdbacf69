use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use futures_util::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

use super::AttendanceService;
use crate::errors::SchoolError;
use crate::models::ApiResponse;
use crate::models::attendance::entities::Attendance;
use crate::models::attendance::requests::RecordAttendanceRequest;
use crate::models::students::entities::StudentProfile;
use crate::reports::attendance::attendance_percentage;
use crate::reports::visibility::can_view_class;
use crate::services::{
    class_permission_denied, load_teacher, storage_error, validation_error,
};
use crate::storage::Storage;

pub async fn record_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    record_data: RecordAttendanceRequest,
) -> ActixResult<HttpResponse> {
    if record_data.entries.is_empty() {
        return Ok(validation_error("At least one attendance entry is required"));
    }

    let storage = service.get_storage(request);
    let teacher = match load_teacher(&storage, request).await {
        Ok(teacher) => teacher,
        Err(resp) => return Ok(resp),
    };
    if !can_view_class(&teacher, &record_data.class_id) {
        return Ok(class_permission_denied());
    }

    let class = match storage.get_class(&record_data.class_id).await {
        Ok(Some(class)) => class,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                crate::models::ErrorCode::ClassNotFound,
                "Class not found",
            )));
        }
        Err(e) => return Ok(storage_error(&e, "Failed to retrieve class")),
    };
    let roster: HashMap<String, StudentProfile> =
        match storage.list_students_by_class(&class.id).await {
            Ok(students) => students
                .into_iter()
                .map(|s| (s.id().to_string(), s))
                .collect(),
            Err(e) => return Ok(storage_error(&e, "Failed to load class roster")),
        };

    // 每个条目都必须是本班学生
    let now = Utc::now();
    let mut records = Vec::with_capacity(record_data.entries.len());
    for entry in record_data.entries {
        let Some(student) = roster.get(&entry.student_id) else {
            return Ok(validation_error(format!(
                "Student {} is not in class {}",
                entry.student_id, class.name
            )));
        };
        // 重复提交同一天的点名会覆盖之前的记录
        records.push(Attendance {
            id: Attendance::roll_call_id(&class.id, student.id(), record_data.date),
            student_id: student.id().to_string(),
            student_name: student.full_name().to_string(),
            class_id: class.id.clone(),
            class_name: class.name.clone(),
            date: record_data.date,
            status: entry.status,
            remarks: entry.remarks,
            recorded_by: teacher.id().to_string(),
            recorded_at: now,
        });
    }

    let records = match storage.record_attendance(records).await {
        Ok(records) => records,
        Err(e) => return Ok(storage_error(&e, "Failed to record attendance")),
    };
    info!(
        "{} attendance records saved for class {} by {}",
        records.len(),
        class.id,
        teacher.id()
    );

    let student_ids: Vec<String> = records.iter().map(|r| r.student_id.clone()).collect();
    refresh_attendance_percentages(&storage, &roster, &student_ids).await;

    Ok(HttpResponse::Created().json(ApiResponse::success(
        records,
        "Attendance recorded successfully",
    )))
}

/// 按全部考勤记录重算学生出勤率，单个学生失败只记录日志
async fn refresh_attendance_percentages(
    storage: &Arc<dyn Storage>,
    roster: &HashMap<String, StudentProfile>,
    student_ids: &[String],
) {
    let updates = student_ids.iter().filter_map(|id| roster.get(id)).map(|student| {
        let storage = storage.clone();
        let mut student = student.clone();
        async move {
            let records = storage.list_attendance_by_student(student.id()).await?;
            let percentage = attendance_percentage(&records);
            if percentage == student.attendance_percentage {
                return Ok::<(), SchoolError>(());
            }
            student.attendance_percentage = percentage;
            storage.update_student(student).await.map(|_| ())
        }
    });

    for (student_id, result) in student_ids.iter().zip(join_all(updates).await) {
        if let Err(e) = result {
            warn!("Failed to refresh attendance for {}: {}", student_id, e);
        }
    }
}
