use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{ClassService, class_not_found};
use crate::models::ApiResponse;
use crate::models::classes::entities::ClassSummary;
use crate::models::classes::requests::UpdateClassRequest;
use crate::services::{storage_error, validation_error};

pub async fn update_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: &str,
    update_data: UpdateClassRequest,
) -> ActixResult<HttpResponse> {
    if update_data
        .name
        .as_deref()
        .is_some_and(|name| name.trim().is_empty())
    {
        return Ok(validation_error("Class name must not be empty"));
    }

    let storage = service.get_storage(request);
    let mut class = match storage.get_class(class_id).await {
        Ok(Some(class)) => class,
        Ok(None) => return Ok(class_not_found()),
        Err(e) => return Ok(storage_error(&e, "Failed to retrieve class")),
    };

    update_data.apply(&mut class);
    match storage.update_class(class).await {
        Ok(class) => {
            info!("Class {} updated", class_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                ClassSummary::from(class),
                "Class updated successfully",
            )))
        }
        Err(e) => Ok(storage_error(&e, "Failed to update class")),
    }
}
