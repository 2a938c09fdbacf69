use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ReportService, load_class};
use crate::models::ApiResponse;
use crate::reports::analyze_class_attendance;
use crate::services::degrade;

pub async fn attendance_analysis(
    service: &ReportService,
    request: &HttpRequest,
    class_id: &str,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let class = match load_class(&storage, request, class_id, true).await {
        Ok(class) => class,
        Err(resp) => return Ok(resp),
    };

    let mut complete = true;
    let (students, records) = futures_util::join!(
        storage.list_students_by_class(&class.id),
        storage.list_attendance_by_class(&class.id)
    );
    let students = degrade(students, "students", "list by class", &mut complete);
    let records = degrade(records, "attendance", "list by class", &mut complete);

    let analysis = analyze_class_attendance(&class, &students, &records, complete);
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        analysis,
        "Attendance analysis generated successfully",
    )))
}
