use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{StudentService, student_not_found};
use crate::models::ApiResponse;
use crate::services::storage_error;

pub async fn delete_student(
    service: &StudentService,
    request: &HttpRequest,
    student_id: &str,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_student(student_id).await {
        Ok(true) => {
            info!("Student {} deleted", student_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Student deleted successfully")))
        }
        Ok(false) => Ok(student_not_found()),
        Err(e) => Ok(storage_error(&e, "Failed to delete student")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use crate::services::test_support::{as_dyn, class, request_as, student};
    use crate::storage::Storage;
    use crate::storage::memory_storage::MemoryStorage;
    use actix_web::http::StatusCode;
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_delete_removes_student_from_roster() {
        let storage = Arc::new(MemoryStorage::new());
        storage.seed_class(class("10A", "t1"));
        storage.seed_student(student("s1", "Ada", "10A"));
        storage.seed_student(student("s2", "Ben", "10A"));
        let service = StudentService::with_storage(as_dyn(&storage));

        let resp = service
            .delete_student(&request_as(UserRole::Hr, "h1"), "s1")
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let class = storage.get_class("10A").await.unwrap().unwrap();
        assert_eq!(class.student_ids, vec!["s2".to_string()]);

        let resp = service
            .delete_student(&request_as(UserRole::Hr, "h1"), "s1")
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
