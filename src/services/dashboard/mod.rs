pub mod hr;
pub mod teacher;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::storage::Storage;

pub struct DashboardService {
    storage: Option<Arc<dyn Storage>>,
}

impl DashboardService {
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

    // 教务仪表盘
    pub async fn hr_dashboard(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        hr::hr_dashboard(self, request).await
    }

    // 教务统计小部件
    pub async fn hr_stats(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        hr::hr_stats(self, request).await
    }

    // 教师仪表盘
    pub async fn teacher_dashboard(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        teacher::teacher_dashboard(self, request).await
    }
}
