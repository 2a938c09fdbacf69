use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{TeacherService, teacher_not_found};
use crate::models::ApiResponse;
use crate::services::storage_error;

pub async fn delete_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    teacher_id: &str,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_teacher(teacher_id).await {
        Ok(true) => {
            info!("Teacher {} deleted", teacher_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Teacher deleted successfully")))
        }
        Ok(false) => Ok(teacher_not_found()),
        Err(e) => Ok(storage_error(&e, "Failed to delete teacher")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use crate::services::test_support::{as_dyn, class, request_as, teacher};
    use crate::storage::Storage;
    use crate::storage::memory_storage::MemoryStorage;
    use actix_web::http::StatusCode;
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_delete_clears_class_teacher() {
        let storage = Arc::new(MemoryStorage::new());
        let mut c = class("10A", "t1");
        c.teacher_name = "Tom Teacher".to_string();
        storage.seed_class(c);
        storage.seed_teacher(teacher("t1", &["10A"]));
        let service = TeacherService::with_storage(as_dyn(&storage));

        let resp = service
            .delete_teacher(&request_as(UserRole::Hr, "h1"), "t1")
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let class = storage.get_class("10A").await.unwrap().unwrap();
        assert!(class.teacher_id.is_empty());
        assert!(class.teacher_name.is_empty());
    }
}
