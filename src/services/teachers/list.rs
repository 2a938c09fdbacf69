use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::models::teachers::requests::TeacherListParams;
use crate::models::{ApiResponse, CountResponse};
use crate::reports;
use crate::services::degrade;

pub async fn list_teachers(
    service: &TeacherService,
    request: &HttpRequest,
    params: TeacherListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let mut complete = true;
    let teachers = degrade(
        storage.list_teachers().await,
        "teachers",
        "list",
        &mut complete,
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        reports::list_teachers(teachers, &params).with_completeness(complete),
        "Teacher list retrieved successfully",
    )))
}

pub async fn count_teachers(
    service: &TeacherService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    // 计数小部件只返回 {count}，降级只记日志
    let count = degrade(storage.list_teachers().await, "teachers", "count", &mut true).len();

    Ok(HttpResponse::Ok().json(CountResponse { count }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use crate::services::test_support::{as_dyn, body_json, request_as, teacher};
    use crate::storage::memory_storage::MemoryStorage;
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_department_filter_and_count() {
        let storage = Arc::new(MemoryStorage::new());
        storage.seed_teacher(teacher("t1", &["10A"]));
        let mut arts = teacher("t2", &[]);
        arts.department = "Arts".to_string();
        storage.seed_teacher(arts);
        let service = TeacherService::with_storage(as_dyn(&storage));
        let req = request_as(UserRole::Hr, "h1");

        let params: TeacherListParams =
            serde_json::from_value(serde_json::json!({"department": "arts"})).unwrap();
        let body = body_json(service.list_teachers(&req, params).await.unwrap()).await;
        assert_eq!(body["data"]["pagination"]["total"], 1);
        assert_eq!(body["data"]["items"][0]["id"], "t2");

        let body = body_json(service.count_teachers(&req).await.unwrap()).await;
        assert_eq!(body["count"], 2);
    }
}
