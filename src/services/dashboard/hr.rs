use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::DashboardService;
use crate::models::reports::responses::{HrDashboard, HrStats};
use crate::models::{ApiResponse, StatsWidgetResponse};
use crate::reports::build_hr_dashboard;
use crate::services::{degrade, report_settings};
use crate::storage::Storage;

/// 三个集合并发读取，任一失败都降级为空集合
async fn load_dashboard(storage: &Arc<dyn Storage>, recent_items: usize) -> HrDashboard {
    let (students, teachers, classes) = futures_util::join!(
        storage.list_students(),
        storage.list_teachers(),
        storage.list_classes()
    );

    let mut complete = true;
    let students = degrade(students, "students", "list", &mut complete);
    let teachers = degrade(teachers, "teachers", "list", &mut complete);
    let classes = degrade(classes, "classes", "list", &mut complete);

    build_hr_dashboard(&students, &teachers, &classes, recent_items, complete)
}

pub async fn hr_dashboard(
    service: &DashboardService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let settings = report_settings(request);

    let dashboard = load_dashboard(&storage, settings.recent_items).await;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        dashboard,
        "Dashboard retrieved successfully",
    )))
}

pub async fn hr_stats(
    service: &DashboardService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let settings = report_settings(request);

    let dashboard = load_dashboard(&storage, settings.recent_items).await;
    Ok(HttpResponse::Ok().json(StatsWidgetResponse {
        success: dashboard.data_complete,
        stats: HrStats::from(&dashboard),
    }))
}
