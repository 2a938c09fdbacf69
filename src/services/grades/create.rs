use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use tracing::info;

use super::{GradeService, refresh_student_gpa, validate_scores};
use crate::models::ApiResponse;
use crate::models::grades::entities::Grade;
use crate::models::grades::requests::CreateGradeRequest;
use crate::services::students::load_visible_student;
use crate::services::{load_teacher, storage_error, validation_error};

pub async fn create_grade(
    service: &GradeService,
    request: &HttpRequest,
    grade_data: CreateGradeRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_scores(&[
        ("test1", Some(grade_data.test1)),
        ("test2", Some(grade_data.test2)),
        ("exam", Some(grade_data.exam)),
        ("assignment", Some(grade_data.assignment)),
    ]) {
        return Ok(validation_error(msg));
    }
    if grade_data.subject.trim().is_empty() {
        return Ok(validation_error("Subject is required"));
    }

    let storage = service.get_storage(request);
    let teacher = match load_teacher(&storage, request).await {
        Ok(teacher) => teacher,
        Err(resp) => return Ok(resp),
    };
    let student = match load_visible_student(&storage, &teacher, &grade_data.student_id).await {
        Ok(student) => student,
        Err(resp) => return Ok(resp),
    };

    let now = Utc::now();
    let mut grade = Grade {
        id: uuid::Uuid::new_v4().to_string(),
        student_id: student.id().to_string(),
        student_name: student.full_name().to_string(),
        teacher_id: teacher.id().to_string(),
        subject: grade_data.subject.trim().to_string(),
        term: grade_data.term,
        year: grade_data.year,
        test1: grade_data.test1,
        test2: grade_data.test2,
        exam: grade_data.exam,
        assignment: grade_data.assignment,
        total_score: 0.0,
        letter_grade: String::new(),
        remarks: grade_data.remarks,
        created_at: now,
        updated_at: now,
    };
    grade.recalculate();

    match storage.create_grade(grade).await {
        Ok(grade) => {
            info!(
                "Grade {} ({}) entered for student {} by {}",
                grade.id,
                grade.letter_grade,
                grade.student_id,
                teacher.id()
            );
            refresh_student_gpa(&storage, &grade.student_id).await;
            Ok(HttpResponse::Created().json(ApiResponse::success(
                grade,
                "Grade recorded successfully",
            )))
        }
        Err(e) => Ok(storage_error(&e, "Failed to record grade")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::grades::entities::Term;
    use crate::models::users::entities::UserRole;
    use crate::services::test_support::{as_dyn, body_json, class, request_as, student, teacher};
    use crate::storage::Storage;
    use crate::storage::memory_storage::MemoryStorage;
    use actix_web::http::StatusCode;
    use std::sync::Arc;

    fn school() -> Arc<MemoryStorage> {
        let storage = Arc::new(MemoryStorage::new());
        storage.seed_class(class("10A", "t1"));
        storage.seed_teacher(teacher("t1", &["10A"]));
        storage.seed_student(student("s1", "Ada", "10A"));
        storage.seed_student(student("s2", "Ben", "10B"));
        storage
    }

    fn request(student_id: &str, exam: f64) -> CreateGradeRequest {
        CreateGradeRequest {
            student_id: student_id.to_string(),
            subject: "Math".to_string(),
            term: Term::First,
            year: 2024,
            test1: 80.0,
            test2: 90.0,
            exam,
            assignment: 100.0,
            remarks: String::new(),
        }
    }

    #[actix_web::test]
    async fn test_grade_is_computed_and_gpa_refreshed() {
        let storage = school();
        let service = GradeService::with_storage(as_dyn(&storage));

        let resp = service
            .create_grade(&request_as(UserRole::Teacher, "t1"), request("s1", 70.0))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body = body_json(resp).await;
        assert_eq!(body["data"]["total_score"], 80.5);
        assert_eq!(body["data"]["letter_grade"], "B");
        assert_eq!(body["data"]["student_name"], "Ada");

        let s1 = storage.get_student("s1").await.unwrap().unwrap();
        assert_eq!(s1.gpa, 3.0);
    }

    #[actix_web::test]
    async fn test_out_of_range_score_is_rejected() {
        let storage = school();
        let service = GradeService::with_storage(as_dyn(&storage));
        let resp = service
            .create_grade(&request_as(UserRole::Teacher, "t1"), request("s1", 101.0))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_grade_for_other_class_redirects() {
        let storage = school();
        let service = GradeService::with_storage(as_dyn(&storage));
        let resp = service
            .create_grade(&request_as(UserRole::Teacher, "t1"), request("s2", 70.0))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert!(storage.list_grades_by_student("s2").await.unwrap().is_empty());
    }
}
