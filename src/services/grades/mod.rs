pub mod create;
pub mod update;
pub mod weighted;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::{info, warn};

use crate::models::grades::requests::{
    CreateGradeRequest, UpdateGradeRequest, WeightedGradePreviewRequest, validate_score,
};
use crate::reports::rollups::gpa_from_grades;
use crate::storage::Storage;

pub struct GradeService {
    storage: Option<Arc<dyn Storage>>,
}

impl GradeService {
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

    // 教师录入成绩
    pub async fn create_grade(
        &self,
        request: &HttpRequest,
        grade_data: CreateGradeRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_grade(self, request, grade_data).await
    }

    // 教师修改自己录入的成绩
    pub async fn update_grade(
        &self,
        request: &HttpRequest,
        grade_id: &str,
        update_data: UpdateGradeRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_grade(self, request, grade_id, update_data).await
    }

    // 加权成绩预览，不落库
    pub async fn preview_weighted_grade(
        &self,
        request: &HttpRequest,
        preview_data: WeightedGradePreviewRequest,
    ) -> ActixResult<HttpResponse> {
        weighted::preview_weighted_grade(self, request, preview_data).await
    }
}

/// 校验一组分项分数
fn validate_scores(scores: &[(&str, Option<f64>)]) -> Result<(), String> {
    for (name, score) in scores {
        if let Some(score) = score {
            validate_score(name, *score)?;
        }
    }
    Ok(())
}

/// 成绩变更后按全部成绩重算 GPA，失败只记录日志
pub(crate) async fn refresh_student_gpa(storage: &Arc<dyn Storage>, student_id: &str) {
    let grades = match storage.list_grades_by_student(student_id).await {
        Ok(grades) => grades,
        Err(e) => {
            warn!("Skipping GPA refresh for {}: {}", student_id, e);
            return;
        }
    };
    let Some(gpa) = gpa_from_grades(&grades) else {
        return;
    };

    match storage.get_student(student_id).await {
        Ok(Some(mut student)) if student.gpa != gpa => {
            student.gpa = gpa;
            match storage.update_student(student).await {
                Ok(_) => info!("GPA of student {} refreshed to {}", student_id, gpa),
                Err(e) => warn!("Failed to store GPA for {}: {}", student_id, e),
            }
        }
        Ok(_) => {}
        Err(e) => warn!("Skipping GPA refresh for {}: {}", student_id, e),
    }
}
