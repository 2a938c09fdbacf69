use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ClassService, class_not_found};
use crate::models::ApiResponse;
use crate::models::classes::entities::ClassSummary;
use crate::services::storage_error;

pub async fn get_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: &str,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_class(class_id).await {
        Ok(Some(class)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ClassSummary::from(class),
            "Class retrieved successfully",
        ))),
        Ok(None) => Ok(class_not_found()),
        Err(e) => Ok(storage_error(&e, "Failed to retrieve class")),
    }
}
