use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::classes::requests::{
    AssignStudentRequest, AssignTeacherRequest, CreateClassRequest, UpdateClassRequest,
};
use crate::models::students::requests::{
    CreateStudentRequest, StudentListParams, UpdateStudentRequest,
};
use crate::models::teachers::requests::{
    CreateTeacherRequest, TeacherListParams, UpdateTeacherRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::{ClassService, DashboardService, ReportService, StudentService, TeacherService};

static DASHBOARD_SERVICE: Lazy<DashboardService> = Lazy::new(DashboardService::new_lazy);
static STUDENT_SERVICE: Lazy<StudentService> = Lazy::new(StudentService::new_lazy);
static TEACHER_SERVICE: Lazy<TeacherService> = Lazy::new(TeacherService::new_lazy);
static CLASS_SERVICE: Lazy<ClassService> = Lazy::new(ClassService::new_lazy);
static REPORT_SERVICE: Lazy<ReportService> = Lazy::new(ReportService::new_lazy);

// 仪表盘
pub async fn dashboard(req: HttpRequest) -> ActixResult<HttpResponse> {
    DASHBOARD_SERVICE.hr_dashboard(&req).await
}

pub async fn stats(req: HttpRequest) -> ActixResult<HttpResponse> {
    DASHBOARD_SERVICE.hr_stats(&req).await
}

// 学生
pub async fn list_students(
    req: HttpRequest,
    query: web::Query<StudentListParams>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .list_students(&req, query.into_inner())
        .await
}

pub async fn count_students(req: HttpRequest) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.count_students(&req).await
}

pub async fn create_student(
    req: HttpRequest,
    student_data: web::Json<CreateStudentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .create_student(&req, student_data.into_inner())
        .await
}

pub async fn get_student(req: HttpRequest, id: web::Path<String>) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.get_student(&req, &id).await
}

pub async fn update_student(
    req: HttpRequest,
    id: web::Path<String>,
    update_data: web::Json<UpdateStudentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .update_student(&req, &id, update_data.into_inner())
        .await
}

pub async fn delete_student(req: HttpRequest, id: web::Path<String>) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.delete_student(&req, &id).await
}

// 教师
pub async fn list_teachers(
    req: HttpRequest,
    query: web::Query<TeacherListParams>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .list_teachers(&req, query.into_inner())
        .await
}

pub async fn count_teachers(req: HttpRequest) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.count_teachers(&req).await
}

pub async fn create_teacher(
    req: HttpRequest,
    teacher_data: web::Json<CreateTeacherRequest>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .create_teacher(&req, teacher_data.into_inner())
        .await
}

pub async fn get_teacher(req: HttpRequest, id: web::Path<String>) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.get_teacher(&req, &id).await
}

pub async fn update_teacher(
    req: HttpRequest,
    id: web::Path<String>,
    update_data: web::Json<UpdateTeacherRequest>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .update_teacher(&req, &id, update_data.into_inner())
        .await
}

pub async fn delete_teacher(req: HttpRequest, id: web::Path<String>) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.delete_teacher(&req, &id).await
}

// 班级
pub async fn list_classes(req: HttpRequest) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.list_classes(&req).await
}

pub async fn create_class(
    req: HttpRequest,
    class_data: web::Json<CreateClassRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .create_class(&req, class_data.into_inner())
        .await
}

pub async fn get_class(req: HttpRequest, id: web::Path<String>) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.get_class(&req, &id).await
}

pub async fn update_class(
    req: HttpRequest,
    id: web::Path<String>,
    update_data: web::Json<UpdateClassRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .update_class(&req, &id, update_data.into_inner())
        .await
}

pub async fn delete_class(req: HttpRequest, id: web::Path<String>) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.delete_class(&req, &id).await
}

pub async fn assign_student(
    req: HttpRequest,
    id: web::Path<String>,
    assign_data: web::Json<AssignStudentRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .assign_student(&req, &id, assign_data.into_inner())
        .await
}

pub async fn assign_teacher(
    req: HttpRequest,
    id: web::Path<String>,
    assign_data: web::Json<AssignTeacherRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .assign_teacher(&req, &id, assign_data.into_inner())
        .await
}

// 报表
pub async fn class_report(req: HttpRequest, id: web::Path<String>) -> ActixResult<HttpResponse> {
    REPORT_SERVICE.class_report(&req, &id).await
}

// 配置路由：整个 scope 仅限教务角色
pub fn configure_hr_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/hr")
            .wrap(middlewares::RequireRole::new_any(UserRole::hr_roles()))
            .wrap(middlewares::RequireJWT)
            .route("/dashboard", web::get().to(dashboard))
            .route("/stats", web::get().to(stats))
            .service(
                web::resource("/students")
                    .route(web::get().to(list_students))
                    .route(web::post().to(create_student)),
            )
            // count 需要在 {id} 之前注册
            .route("/students/count", web::get().to(count_students))
            .service(
                web::resource("/students/{id}")
                    .route(web::get().to(get_student))
                    .route(web::put().to(update_student))
                    .route(web::delete().to(delete_student)),
            )
            .service(
                web::resource("/teachers")
                    .route(web::get().to(list_teachers))
                    .route(web::post().to(create_teacher)),
            )
            .route("/teachers/count", web::get().to(count_teachers))
            .service(
                web::resource("/teachers/{id}")
                    .route(web::get().to(get_teacher))
                    .route(web::put().to(update_teacher))
                    .route(web::delete().to(delete_teacher)),
            )
            .service(
                web::resource("/classes")
                    .route(web::get().to(list_classes))
                    .route(web::post().to(create_class)),
            )
            .service(
                web::resource("/classes/{id}")
                    .route(web::get().to(get_class))
                    .route(web::put().to(update_class))
                    .route(web::delete().to(delete_class)),
            )
            .route("/classes/{id}/students", web::post().to(assign_student))
            .route("/classes/{id}/teacher", web::post().to(assign_teacher))
            .route("/reports/classes/{id}", web::get().to(class_report)),
    );
}
