use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeService;
use crate::models::grades::entities::WeightedGrade;
use crate::models::grades::requests::WeightedGradePreviewRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::load_teacher;
use crate::services::students::load_visible_student;

pub async fn preview_weighted_grade(
    service: &GradeService,
    request: &HttpRequest,
    preview_data: WeightedGradePreviewRequest,
) -> ActixResult<HttpResponse> {
    let weights = preview_data.weights.unwrap_or_default();
    if let Err(msg) = WeightedGrade::validate(&preview_data.scores, &weights) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::InvalidGradeWeights, msg)));
    }

    let storage = service.get_storage(request);
    let teacher = match load_teacher(&storage, request).await {
        Ok(teacher) => teacher,
        Err(resp) => return Ok(resp),
    };
    let student = match load_visible_student(&storage, &teacher, &preview_data.student_id).await
    {
        Ok(student) => student,
        Err(resp) => return Ok(resp),
    };

    let mut grade = WeightedGrade {
        student_id: student.id().to_string(),
        student_name: student.full_name().to_string(),
        subject: preview_data.subject,
        term: preview_data.term,
        year: preview_data.year,
        scores: preview_data.scores,
        weights,
        total_score: 0.0,
        letter_grade: String::new(),
    };
    grade.recalculate();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        grade,
        "Weighted grade calculated",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use crate::services::test_support::{as_dyn, body_json, class, request_as, student, teacher};
    use crate::storage::memory_storage::MemoryStorage;
    use actix_web::http::StatusCode;
    use serde_json::json;
    use std::sync::Arc;

    fn service() -> GradeService {
        let storage = Arc::new(MemoryStorage::new());
        storage.seed_class(class("10A", "t1"));
        storage.seed_teacher(teacher("t1", &["10A"]));
        storage.seed_student(student("s1", "Ada", "10A"));
        GradeService::with_storage(as_dyn(&storage))
    }

    #[actix_web::test]
    async fn test_default_weights_are_applied() {
        let preview: WeightedGradePreviewRequest = serde_json::from_value(json!({
            "student_id": "s1",
            "subject": "Math",
            "term": "Second",
            "year": 2024,
            "scores": {
                "test1": 100.0, "test2": 100.0, "quiz": 50.0, "assignment": 50.0,
                "project": 50.0, "participation": 50.0, "exam": 100.0
            }
        }))
        .unwrap();

        let resp = service()
            .preview_weighted_grade(&request_as(UserRole::Teacher, "t1"), preview)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["data"]["total_score"], 82.5);
        assert_eq!(body["data"]["letter_grade"], "B-");
    }

    #[actix_web::test]
    async fn test_invalid_weights_are_rejected() {
        let preview: WeightedGradePreviewRequest = serde_json::from_value(json!({
            "student_id": "s1",
            "subject": "Math",
            "term": "First",
            "year": 2024,
            "scores": {"exam": 90.0},
            "weights": {"exam": 60.0}
        }))
        .unwrap();

        let resp = service()
            .preview_weighted_grade(&request_as(UserRole::Teacher, "t1"), preview)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(resp).await["code"],
            ErrorCode::InvalidGradeWeights as i32
        );
    }
}
