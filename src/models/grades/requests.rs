use serde::Deserialize;

use super::entities::{ComponentValues, Term};

// 录入成绩请求
#[derive(Debug, Deserialize)]
pub struct CreateGradeRequest {
    pub student_id: String,
    pub subject: String,
    pub term: Term,
    pub year: i32,
    pub test1: f64,
    pub test2: f64,
    pub exam: f64,
    pub assignment: f64,
    #[serde(default)]
    pub remarks: String,
}

// 修改成绩请求
#[derive(Debug, Default, Deserialize)]
pub struct UpdateGradeRequest {
    pub test1: Option<f64>,
    pub test2: Option<f64>,
    pub exam: Option<f64>,
    pub assignment: Option<f64>,
    pub remarks: Option<String>,
}

impl UpdateGradeRequest {
    pub fn apply(self, grade: &mut super::entities::Grade) {
        if let Some(v) = self.test1 {
            grade.test1 = v;
        }
        if let Some(v) = self.test2 {
            grade.test2 = v;
        }
        if let Some(v) = self.exam {
            grade.exam = v;
        }
        if let Some(v) = self.assignment {
            grade.assignment = v;
        }
        if let Some(v) = self.remarks {
            grade.remarks = v;
        }
        grade.recalculate();
    }
}

// 加权成绩预览请求，权重缺省时使用默认配置
#[derive(Debug, Deserialize)]
pub struct WeightedGradePreviewRequest {
    pub student_id: String,
    pub subject: String,
    pub term: Term,
    pub year: i32,
    pub scores: ComponentValues,
    pub weights: Option<ComponentValues>,
}

/// 分数必须在 0..=100
pub fn validate_score(name: &str, value: f64) -> Result<(), String> {
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(format!("{name} must be between 0 and 100"))
    }
}
