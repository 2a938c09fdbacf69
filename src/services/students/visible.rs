//! 教师端学生视图，可见范围限定在教师所带班级

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::{StudentService, student_not_found};
use crate::models::{ApiResponse, ListResponse};
use crate::models::students::entities::StudentProfile;
use crate::models::students::requests::StudentListParams;
use crate::models::students::responses::StudentDetailResponse;
use crate::models::teachers::entities::TeacherProfile;
use crate::reports::{self, attendance::attendance_percentage, rollups::mean_score};
use crate::services::{degrade, load_teacher, storage_error, student_access_redirect};
use crate::storage::Storage;

pub async fn list_visible_students(
    service: &StudentService,
    request: &HttpRequest,
    params: StudentListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let teacher = match load_teacher(&storage, request).await {
        Ok(teacher) => teacher,
        Err(resp) => return Ok(resp),
    };

    let mut complete = true;
    let mut students = Vec::new();
    for class_id in &teacher.classes {
        students.extend(degrade(
            storage.list_students_by_class(class_id).await,
            "students",
            "list by class",
            &mut complete,
        ));
    }
    let students = reports::visible_students(&teacher, students);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        reports::list_students(students, &params).with_completeness(complete),
        "Student list retrieved successfully",
    )))
}

/// 读取学生并校验教师可见性
pub(crate) async fn load_visible_student(
    storage: &Arc<dyn Storage>,
    teacher: &TeacherProfile,
    student_id: &str,
) -> Result<StudentProfile, HttpResponse> {
    match storage.get_student(student_id).await {
        Ok(Some(student)) if reports::can_view_student(teacher, &student) => Ok(student),
        Ok(Some(_)) => {
            tracing::info!(
                "Teacher {} denied access to student {}",
                teacher.id(),
                student_id
            );
            Err(student_access_redirect())
        }
        Ok(None) => Err(student_not_found()),
        Err(e) => Err(storage_error(&e, "Failed to retrieve student")),
    }
}

pub async fn get_visible_student(
    service: &StudentService,
    request: &HttpRequest,
    student_id: &str,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let teacher = match load_teacher(&storage, request).await {
        Ok(teacher) => teacher,
        Err(resp) => return Ok(resp),
    };
    let student = match load_visible_student(&storage, &teacher, student_id).await {
        Ok(student) => student,
        Err(resp) => return Ok(resp),
    };

    let mut complete = true;
    let (grades, records) = futures_util::join!(
        storage.list_grades_by_student(student_id),
        storage.list_attendance_by_student(student_id)
    );
    let grades = degrade(grades, "grades", "list by student", &mut complete);
    let records = degrade(records, "attendance", "list by student", &mut complete);

    let totals: Vec<f64> = grades.iter().map(|g| g.total_score).collect();
    // 没有考勤记录时沿用档案里的出勤率
    let attendance = if records.is_empty() {
        student.attendance_percentage
    } else {
        attendance_percentage(&records)
    };

    let response = StudentDetailResponse {
        average_score: mean_score(&totals),
        attendance_percentage: attendance,
        student,
        grades,
        data_complete: complete,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Student retrieved successfully",
    )))
}

pub async fn list_visible_student_grades(
    service: &StudentService,
    request: &HttpRequest,
    student_id: &str,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let teacher = match load_teacher(&storage, request).await {
        Ok(teacher) => teacher,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) = load_visible_student(&storage, &teacher, student_id).await {
        return Ok(resp);
    }

    let mut complete = true;
    let mut grades = degrade(
        storage.list_grades_by_student(student_id).await,
        "grades",
        "list by student",
        &mut complete,
    );
    grades.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        ListResponse::new(grades, complete),
        "Grades retrieved successfully",
    )))
}
