use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{ClassService, class_not_found};
use crate::models::ApiResponse;
use crate::services::storage_error;

pub async fn delete_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: &str,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_class(class_id).await {
        Ok(true) => {
            info!("Class {} deleted", class_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Class deleted successfully")))
        }
        Ok(false) => Ok(class_not_found()),
        Err(e) => Ok(storage_error(&e, "Failed to delete class")),
    }
}
