use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{GradeService, refresh_student_gpa, validate_scores};
use crate::models::grades::requests::UpdateGradeRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::students::load_visible_student;
use crate::services::{load_teacher, storage_error, validation_error};

pub async fn update_grade(
    service: &GradeService,
    request: &HttpRequest,
    grade_id: &str,
    update_data: UpdateGradeRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_scores(&[
        ("test1", update_data.test1),
        ("test2", update_data.test2),
        ("exam", update_data.exam),
        ("assignment", update_data.assignment),
    ]) {
        return Ok(validation_error(msg));
    }

    let storage = service.get_storage(request);
    let teacher = match load_teacher(&storage, request).await {
        Ok(teacher) => teacher,
        Err(resp) => return Ok(resp),
    };

    let mut grade = match storage.get_grade(grade_id).await {
        Ok(Some(grade)) => grade,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::GradeNotFound,
                "Grade not found",
            )));
        }
        Err(e) => return Ok(storage_error(&e, "Failed to retrieve grade")),
    };

    if grade.teacher_id != teacher.id() {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "You can only modify grades you entered",
        )));
    }
    // 学生转班后原任课教师不能再改
    if let Err(resp) = load_visible_student(&storage, &teacher, &grade.student_id).await {
        return Ok(resp);
    }

    update_data.apply(&mut grade);
    match storage.update_grade(grade).await {
        Ok(grade) => {
            info!("Grade {} updated by {}", grade.id, teacher.id());
            refresh_student_gpa(&storage, &grade.student_id).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                grade,
                "Grade updated successfully",
            )))
        }
        Err(e) => Ok(storage_error(&e, "Failed to update grade")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use crate::services::test_support::{
        as_dyn, body_json, class, grade, request_as, student, teacher,
    };
    use crate::storage::Storage;
    use crate::storage::memory_storage::MemoryStorage;
    use actix_web::http::StatusCode;
    use std::sync::Arc;

    fn school() -> Arc<MemoryStorage> {
        let storage = Arc::new(MemoryStorage::new());
        storage.seed_class(class("10A", "t1"));
        storage.seed_teacher(teacher("t1", &["10A"]));
        storage.seed_teacher(teacher("t2", &["10A"]));
        storage.seed_student(student("s1", "Ada", "10A"));
        storage.seed_grade(grade("g1", "s1", "t1", 50.0));
        storage
    }

    #[actix_web::test]
    async fn test_update_recomputes_total() {
        let storage = school();
        let service = GradeService::with_storage(as_dyn(&storage));
        let update = UpdateGradeRequest {
            exam: Some(100.0),
            ..Default::default()
        };

        let resp = service
            .update_grade(&request_as(UserRole::Teacher, "t1"), "g1", update)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        // 50*60% + 100*40%
        assert_eq!(body_json(resp).await["data"]["total_score"], 70.0);

        let s1 = storage.get_student("s1").await.unwrap().unwrap();
        assert_eq!(s1.gpa, 2.0);
    }

    #[actix_web::test]
    async fn test_only_author_can_update() {
        let storage = school();
        let service = GradeService::with_storage(as_dyn(&storage));
        let resp = service
            .update_grade(
                &request_as(UserRole::Teacher, "t2"),
                "g1",
                UpdateGradeRequest::default(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let resp = service
            .update_grade(
                &request_as(UserRole::Teacher, "t1"),
                "missing",
                UpdateGradeRequest::default(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
