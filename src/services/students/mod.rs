pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;
pub mod visible;

pub(crate) use visible::load_visible_student;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::students::requests::{
    CreateStudentRequest, StudentListParams, UpdateStudentRequest,
};
use crate::storage::Storage;

pub struct StudentService {
    storage: Option<Arc<dyn Storage>>,
}

impl StudentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    #[cfg(test)]
    pub(crate) fn with_storage(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage: Some(storage),
        }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        super::storage_from_request(&self.storage, request)
    }

    // 教务：学生列表（搜索、年级筛选、排序、分页）
    pub async fn list_students(
        &self,
        request: &HttpRequest,
        params: StudentListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_students(self, request, params).await
    }

    // 教务：学生总数
    pub async fn count_students(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::count_students(self, request).await
    }

    pub async fn get_student(
        &self,
        request: &HttpRequest,
        student_id: &str,
    ) -> ActixResult<HttpResponse> {
        get::get_student(self, request, student_id).await
    }

    // 教务：新增学生，同时创建登录账号
    pub async fn create_student(
        &self,
        request: &HttpRequest,
        create_data: CreateStudentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_student(self, request, create_data).await
    }

    pub async fn update_student(
        &self,
        request: &HttpRequest,
        student_id: &str,
        update_data: UpdateStudentRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_student(self, request, student_id, update_data).await
    }

    pub async fn delete_student(
        &self,
        request: &HttpRequest,
        student_id: &str,
    ) -> ActixResult<HttpResponse> {
        delete::delete_student(self, request, student_id).await
    }

    // 教师：所带班级内的学生
    pub async fn list_visible_students(
        &self,
        request: &HttpRequest,
        params: StudentListParams,
    ) -> ActixResult<HttpResponse> {
        visible::list_visible_students(self, request, params).await
    }

    // 教师：学生详情（含成绩和出勤）
    pub async fn get_visible_student(
        &self,
        request: &HttpRequest,
        student_id: &str,
    ) -> ActixResult<HttpResponse> {
        visible::get_visible_student(self, request, student_id).await
    }

    // 教师：学生成绩
    pub async fn list_visible_student_grades(
        &self,
        request: &HttpRequest,
        student_id: &str,
    ) -> ActixResult<HttpResponse> {
        visible::list_visible_student_grades(self, request, student_id).await
    }
}

fn student_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(crate::models::ApiResponse::error_empty(
        crate::models::ErrorCode::StudentNotFound,
        "Student not found",
    ))
}
