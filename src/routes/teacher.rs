use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::attendance::requests::{AttendanceListParams, RecordAttendanceRequest};
use crate::models::grades::requests::{
    CreateGradeRequest, UpdateGradeRequest, WeightedGradePreviewRequest,
};
use crate::models::students::requests::StudentListParams;
use crate::models::users::entities::UserRole;
use crate::services::{
    AttendanceService, DashboardService, GradeService, ReportService, StudentService,
};

static DASHBOARD_SERVICE: Lazy<DashboardService> = Lazy::new(DashboardService::new_lazy);
static STUDENT_SERVICE: Lazy<StudentService> = Lazy::new(StudentService::new_lazy);
static GRADE_SERVICE: Lazy<GradeService> = Lazy::new(GradeService::new_lazy);
static ATTENDANCE_SERVICE: Lazy<AttendanceService> = Lazy::new(AttendanceService::new_lazy);
static REPORT_SERVICE: Lazy<ReportService> = Lazy::new(ReportService::new_lazy);

pub async fn dashboard(req: HttpRequest) -> ActixResult<HttpResponse> {
    DASHBOARD_SERVICE.teacher_dashboard(&req).await
}

// 学生（仅本人班级）
pub async fn list_students(
    req: HttpRequest,
    query: web::Query<StudentListParams>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .list_visible_students(&req, query.into_inner())
        .await
}

pub async fn get_student(req: HttpRequest, id: web::Path<String>) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.get_visible_student(&req, &id).await
}

pub async fn list_student_grades(
    req: HttpRequest,
    id: web::Path<String>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.list_visible_student_grades(&req, &id).await
}

// 成绩
pub async fn create_grade(
    req: HttpRequest,
    grade_data: web::Json<CreateGradeRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE
        .create_grade(&req, grade_data.into_inner())
        .await
}

pub async fn update_grade(
    req: HttpRequest,
    id: web::Path<String>,
    update_data: web::Json<UpdateGradeRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE
        .update_grade(&req, &id, update_data.into_inner())
        .await
}

pub async fn preview_weighted_grade(
    req: HttpRequest,
    preview_data: web::Json<WeightedGradePreviewRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE
        .preview_weighted_grade(&req, preview_data.into_inner())
        .await
}

// 考勤
pub async fn list_attendance(
    req: HttpRequest,
    query: web::Query<AttendanceListParams>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .list_attendance(&req, query.into_inner())
        .await
}

pub async fn record_attendance(
    req: HttpRequest,
    record_data: web::Json<RecordAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .record_attendance(&req, record_data.into_inner())
        .await
}

// 报表
pub async fn class_report(req: HttpRequest, id: web::Path<String>) -> ActixResult<HttpResponse> {
    REPORT_SERVICE.teacher_class_report(&req, &id).await
}

pub async fn attendance_analysis(
    req: HttpRequest,
    id: web::Path<String>,
) -> ActixResult<HttpResponse> {
    REPORT_SERVICE.attendance_analysis(&req, &id).await
}

// 配置路由：整个 scope 仅限教师角色
pub fn configure_teacher_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/teacher")
            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
            .wrap(middlewares::RequireJWT)
            .route("/dashboard", web::get().to(dashboard))
            .route("/students", web::get().to(list_students))
            .route("/students/{id}", web::get().to(get_student))
            .route("/students/{id}/grades", web::get().to(list_student_grades))
            .route("/grades", web::post().to(create_grade))
            // weighted-preview 需要在 {id} 之前注册
            .route(
                "/grades/weighted-preview",
                web::post().to(preview_weighted_grade),
            )
            .route("/grades/{id}", web::put().to(update_grade))
            .service(
                web::resource("/attendance")
                    .route(web::get().to(list_attendance))
                    .route(web::post().to(record_attendance)),
            )
            .route("/reports/classes/{id}", web::get().to(class_report))
            .route("/reports/attendance/{id}", web::get().to(attendance_analysis)),
    );
}
