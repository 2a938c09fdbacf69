use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::students::requests::StudentListParams;
use crate::models::{ApiResponse, CountResponse};
use crate::reports;
use crate::services::degrade;

pub async fn list_students(
    service: &StudentService,
    request: &HttpRequest,
    params: StudentListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let mut complete = true;
    let students = degrade(
        storage.list_students().await,
        "students",
        "list",
        &mut complete,
    );

    let response = reports::list_students(students, &params).with_completeness(complete);
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Student list retrieved successfully",
    )))
}

pub async fn count_students(
    service: &StudentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    // 计数小部件只返回 {count}，降级只记日志
    let count = degrade(storage.list_students().await, "students", "count", &mut true).len();

    Ok(HttpResponse::Ok().json(CountResponse { count }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use crate::services::test_support::{as_dyn, body_json, request_as, student};
    use crate::storage::memory_storage::MemoryStorage;
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_second_page_of_students() {
        let storage = Arc::new(MemoryStorage::new());
        for i in 0..45 {
            storage.seed_student(student(&format!("s{i:02}"), &format!("Student {i:02}"), ""));
        }
        let service = StudentService::with_storage(as_dyn(&storage));
        let params: StudentListParams =
            serde_json::from_value(serde_json::json!({"page": 2, "size": 20})).unwrap();

        let resp = service
            .list_students(&request_as(UserRole::Hr, "h1"), params)
            .await
            .unwrap();
        let body = body_json(resp).await;
        assert_eq!(body["data"]["items"].as_array().map(Vec::len), Some(20));
        assert_eq!(body["data"]["items"][0]["full_name"], "Student 20");
        assert_eq!(body["data"]["pagination"]["total"], 45);
        assert_eq!(body["data"]["pagination"]["total_pages"], 3);
        assert_eq!(body["data"]["data_complete"], true);
    }

    #[actix_web::test]
    async fn test_failed_listing_is_flagged_incomplete() {
        let storage = Arc::new(MemoryStorage::new());
        storage.seed_student(student("s1", "Ada", ""));
        storage.fail_lists();
        let service = StudentService::with_storage(as_dyn(&storage));

        let resp = service
            .list_students(&request_as(UserRole::Hr, "h1"), StudentListParams::default())
            .await
            .unwrap();
        assert_eq!(resp.status(), actix_web::http::StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["data"]["pagination"]["total"], 0);
        assert_eq!(body["data"]["data_complete"], false);
    }

    #[actix_web::test]
    async fn test_count_degrades_to_zero() {
        let storage = Arc::new(MemoryStorage::new());
        storage.seed_student(student("s1", "Ada", ""));
        storage.fail_lists();
        let service = StudentService::with_storage(as_dyn(&storage));

        let resp = service
            .count_students(&request_as(UserRole::Hr, "h1"))
            .await
            .unwrap();
        assert_eq!(resp.status(), actix_web::http::StatusCode::OK);
        assert_eq!(body_json(resp).await["count"], 0);
    }
}
