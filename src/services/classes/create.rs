use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ClassService;
use crate::models::ApiResponse;
use crate::models::classes::entities::{Class, ClassSummary};
use crate::models::classes::requests::CreateClassRequest;
use crate::services::{storage_error, validation_error};

pub async fn create_class(
    service: &ClassService,
    request: &HttpRequest,
    class_data: CreateClassRequest,
) -> ActixResult<HttpResponse> {
    let name = class_data.name.trim();
    if name.is_empty() {
        return Ok(validation_error("Class name is required"));
    }

    let mut class = Class::new(&uuid::Uuid::new_v4().to_string(), name);
    class.grade_level = class_data.grade_level.unwrap_or_default();
    class.subject = class_data.subject.unwrap_or_default();
    class.room = class_data.room.unwrap_or_default();
    class.schedule = class_data.schedule.unwrap_or_default();

    let storage = service.get_storage(request);
    match storage.create_class(class).await {
        Ok(class) => {
            info!("Class {} ({}) created", class.name, class.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                ClassSummary::from(class),
                "Class created successfully",
            )))
        }
        Err(e) => Ok(storage_error(&e, "Failed to create class")),
    }
}
