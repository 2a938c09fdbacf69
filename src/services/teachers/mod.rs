pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::teachers::requests::{
    CreateTeacherRequest, TeacherListParams, UpdateTeacherRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct TeacherService {
    storage: Option<Arc<dyn Storage>>,
}

impl TeacherService {
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

    pub async fn list_teachers(
        &self,
        request: &HttpRequest,
        params: TeacherListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_teachers(self, request, params).await
    }

    pub async fn count_teachers(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::count_teachers(self, request).await
    }

    pub async fn get_teacher(
        &self,
        request: &HttpRequest,
        teacher_id: &str,
    ) -> ActixResult<HttpResponse> {
        get::get_teacher(self, request, teacher_id).await
    }

    // 新增教师，同时创建登录账号
    pub async fn create_teacher(
        &self,
        request: &HttpRequest,
        create_data: CreateTeacherRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_teacher(self, request, create_data).await
    }

    pub async fn update_teacher(
        &self,
        request: &HttpRequest,
        teacher_id: &str,
        update_data: UpdateTeacherRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_teacher(self, request, teacher_id, update_data).await
    }

    pub async fn delete_teacher(
        &self,
        request: &HttpRequest,
        teacher_id: &str,
    ) -> ActixResult<HttpResponse> {
        delete::delete_teacher(self, request, teacher_id).await
    }
}

fn teacher_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::TeacherNotFound,
        "Teacher not found",
    ))
}
