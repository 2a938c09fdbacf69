use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::models::{ApiResponse, ListResponse};
use crate::models::classes::entities::ClassSummary;
use crate::services::degrade;

pub async fn list_classes(
    service: &ClassService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let mut complete = true;
    let mut classes = degrade(storage.list_classes().await, "classes", "list", &mut complete);
    classes.sort_by(|a, b| a.name.cmp(&b.name));

    let classes: Vec<ClassSummary> = classes.into_iter().map(ClassSummary::from).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        ListResponse::new(classes, complete),
        "Class list retrieved successfully",
    )))
}
