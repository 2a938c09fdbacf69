use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::models::{ApiResponse, ListResponse};
use crate::models::attendance::requests::AttendanceListParams;
use crate::reports::visibility::can_view_class;
use crate::services::{class_permission_denied, degrade, load_teacher};

pub async fn list_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    params: AttendanceListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let teacher = match load_teacher(&storage, request).await {
        Ok(teacher) => teacher,
        Err(resp) => return Ok(resp),
    };
    if !can_view_class(&teacher, &params.class_id) {
        return Ok(class_permission_denied());
    }

    let mut complete = true;
    let mut records = degrade(
        storage.list_attendance_by_class(&params.class_id).await,
        "attendance",
        "list by class",
        &mut complete,
    );
    records.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| a.student_name.cmp(&b.student_name))
    });

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        ListResponse::new(records, complete),
        "Attendance retrieved successfully",
    )))
}
