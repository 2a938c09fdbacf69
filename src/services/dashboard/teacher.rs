use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::future::join_all;

use super::DashboardService;
use crate::models::ApiResponse;
use crate::reports::build_teacher_dashboard;
use crate::services::{degrade, load_teacher, report_settings};

pub async fn teacher_dashboard(
    service: &DashboardService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let settings = report_settings(request);
    let teacher = match load_teacher(&storage, request).await {
        Ok(teacher) => teacher,
        Err(resp) => return Ok(resp),
    };

    // 按班级并发读取班级和学生
    let class_reads = join_all(teacher.classes.iter().map(|id| storage.get_class(id)));
    let roster_reads = join_all(
        teacher
            .classes
            .iter()
            .map(|id| storage.list_students_by_class(id)),
    );
    let (class_results, roster_results, grades) = futures_util::join!(
        class_reads,
        roster_reads,
        storage.list_grades_by_teacher(teacher.id())
    );

    let mut complete = true;
    let classes = class_results
        .into_iter()
        .filter_map(|r| degrade(r, "classes", "get", &mut complete))
        .collect();
    let students = roster_results
        .into_iter()
        .flat_map(|r| degrade(r, "students", "list by class", &mut complete))
        .collect();
    let grades = degrade(grades, "grades", "list by teacher", &mut complete);

    let dashboard = build_teacher_dashboard(
        &teacher,
        students,
        classes,
        grades,
        settings.recent_items,
        complete,
    );
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        dashboard,
        "Dashboard retrieved successfully",
    )))
}
