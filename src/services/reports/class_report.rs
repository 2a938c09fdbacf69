use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use tracing::info;

use super::{ReportService, load_class};
use crate::models::ApiResponse;
use crate::reports::build_class_report;
use crate::services::{degrade, fan_out};

pub async fn class_report(
    service: &ReportService,
    request: &HttpRequest,
    class_id: &str,
    teacher_only: bool,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let class = match load_class(&storage, request, class_id, teacher_only).await {
        Ok(class) => class,
        Err(resp) => return Ok(resp),
    };

    let mut complete = true;
    let (students, attendance) = futures_util::join!(
        storage.list_students_by_class(&class.id),
        storage.list_attendance_by_class(&class.id)
    );
    let students = degrade(students, "students", "list by class", &mut complete);
    let attendance = degrade(attendance, "attendance", "list by class", &mut complete);

    // 成绩按学生逐个拉取，单个失败只跳过该学生
    let student_ids: Vec<String> = students.iter().map(|s| s.id().to_string()).collect();
    let grades = fan_out(
        &student_ids,
        "grades",
        |id| {
            let storage = storage.clone();
            async move { storage.list_grades_by_student(&id).await }
        },
        &mut complete,
    )
    .await;

    if !complete {
        info!("Class report for {} built from partial data", class.id);
    }
    let report = build_class_report(class, &students, &grades, &attendance, complete, Utc::now());
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        report,
        "Class report generated successfully",
    )))
}
