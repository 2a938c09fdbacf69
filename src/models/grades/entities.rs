use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::math::round_to;

/// 成绩及格线（百分制），与 GPA 及格线是两个不同的门槛
pub const SCORE_PASS_THRESHOLD: f64 = 60.0;

// 学期
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    First,
    Second,
    Third,
    Final,
}

impl Term {
    pub fn as_str(&self) -> &'static str {
        match self {
            Term::First => "First",
            Term::Second => "Second",
            Term::Third => "Third",
            Term::Final => "Final",
        }
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Term {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" => Ok(Term::First),
            "second" => Ok(Term::Second),
            "third" => Ok(Term::Third),
            "final" => Ok(Term::Final),
            _ => Err(format!("Invalid term: {s}")),
        }
    }
}

/// 五档字母等级，按分数从高到低依次匹配，边界值取高档
pub const LETTER_SCALE: [(f64, &str); 4] = [(90.0, "A"), (80.0, "B"), (70.0, "C"), (60.0, "D")];

/// 所有五档字母，按固定顺序
pub const LETTERS: [&str; 5] = ["A", "B", "C", "D", "F"];

pub fn letter_for_score(score: f64) -> &'static str {
    LETTER_SCALE
        .iter()
        .find(|(cutoff, _)| score >= *cutoff)
        .map(|(_, letter)| *letter)
        .unwrap_or("F")
}

// 成绩：两次测验 25%，考试 40%，作业 10%
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    pub id: String,
    pub student_id: String,
    pub student_name: String,
    pub teacher_id: String,
    pub subject: String,
    pub term: Term,
    pub year: i32,
    pub test1: f64,
    pub test2: f64,
    pub exam: f64,
    pub assignment: f64,
    pub total_score: f64,
    pub letter_grade: String,
    pub remarks: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Grade {
    pub const TEST1_WEIGHT: f64 = 25.0;
    pub const TEST2_WEIGHT: f64 = 25.0;
    pub const EXAM_WEIGHT: f64 = 40.0;
    pub const ASSIGNMENT_WEIGHT: f64 = 10.0;

    /// 加权总分，保留两位小数
    pub fn compute_total(test1: f64, test2: f64, exam: f64, assignment: f64) -> f64 {
        let weighted = test1 * Self::TEST1_WEIGHT
            + test2 * Self::TEST2_WEIGHT
            + exam * Self::EXAM_WEIGHT
            + assignment * Self::ASSIGNMENT_WEIGHT;
        round_to(weighted / 100.0, 2)
    }

    /// 根据分项重新计算总分和等级
    pub fn recalculate(&mut self) {
        self.total_score = Self::compute_total(self.test1, self.test2, self.exam, self.assignment);
        self.letter_grade = letter_for_score(self.total_score).to_string();
    }

    pub fn is_passing(&self) -> bool {
        self.total_score >= SCORE_PASS_THRESHOLD
    }
}

// 加权成绩的七个分项
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradeComponent {
    Test1,
    Test2,
    Quiz,
    Assignment,
    Project,
    Participation,
    Exam,
}

impl GradeComponent {
    pub const ALL: [GradeComponent; 7] = [
        GradeComponent::Test1,
        GradeComponent::Test2,
        GradeComponent::Quiz,
        GradeComponent::Assignment,
        GradeComponent::Project,
        GradeComponent::Participation,
        GradeComponent::Exam,
    ];
}

/// 七个分项的数值，分数和权重共用
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentValues {
    #[serde(default)]
    pub test1: f64,
    #[serde(default)]
    pub test2: f64,
    #[serde(default)]
    pub quiz: f64,
    #[serde(default)]
    pub assignment: f64,
    #[serde(default)]
    pub project: f64,
    #[serde(default)]
    pub participation: f64,
    #[serde(default)]
    pub exam: f64,
}

impl ComponentValues {
    pub fn get(&self, component: GradeComponent) -> f64 {
        match component {
            GradeComponent::Test1 => self.test1,
            GradeComponent::Test2 => self.test2,
            GradeComponent::Quiz => self.quiz,
            GradeComponent::Assignment => self.assignment,
            GradeComponent::Project => self.project,
            GradeComponent::Participation => self.participation,
            GradeComponent::Exam => self.exam,
        }
    }

    pub fn sum(&self) -> f64 {
        GradeComponent::ALL.iter().map(|c| self.get(*c)).sum()
    }
}

impl Default for ComponentValues {
    // 默认权重，总和 100
    fn default() -> Self {
        Self {
            test1: 15.0,
            test2: 15.0,
            quiz: 10.0,
            assignment: 10.0,
            project: 10.0,
            participation: 5.0,
            exam: 35.0,
        }
    }
}

/// 十二档细分等级
pub const WEIGHTED_LETTER_SCALE: [(f64, &str); 11] = [
    (93.0, "A"),
    (90.0, "A-"),
    (87.0, "B+"),
    (83.0, "B"),
    (80.0, "B-"),
    (77.0, "C+"),
    (73.0, "C"),
    (70.0, "C-"),
    (67.0, "D+"),
    (63.0, "D"),
    (60.0, "D-"),
];

pub fn weighted_letter_for_score(score: f64) -> &'static str {
    WEIGHTED_LETTER_SCALE
        .iter()
        .find(|(cutoff, _)| score >= *cutoff)
        .map(|(_, letter)| *letter)
        .unwrap_or("F")
}

// 可配置权重的加权成绩
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedGrade {
    pub student_id: String,
    pub student_name: String,
    pub subject: String,
    pub term: Term,
    pub year: i32,
    pub scores: ComponentValues,
    pub weights: ComponentValues,
    pub total_score: f64,
    pub letter_grade: String,
}

impl WeightedGrade {
    /// 权重必须非负且总和为 100，分数必须在 0..=100
    pub fn validate(scores: &ComponentValues, weights: &ComponentValues) -> Result<(), String> {
        for component in GradeComponent::ALL {
            let weight = weights.get(component);
            if weight < 0.0 {
                return Err(format!("Weight for {component:?} must not be negative"));
            }
            let score = scores.get(component);
            if !(0.0..=100.0).contains(&score) {
                return Err(format!("Score for {component:?} must be between 0 and 100"));
            }
        }
        let total = weights.sum();
        if (total - 100.0).abs() > 0.01 {
            return Err(format!("Weights must sum to 100, got {}", round_to(total, 2)));
        }
        Ok(())
    }

    pub fn compute_total(scores: &ComponentValues, weights: &ComponentValues) -> f64 {
        let weighted: f64 = GradeComponent::ALL
            .iter()
            .map(|c| scores.get(*c) * weights.get(*c))
            .sum();
        round_to(weighted / 100.0, 2)
    }

    pub fn recalculate(&mut self) {
        self.total_score = Self::compute_total(&self.scores, &self.weights);
        self.letter_grade = weighted_letter_for_score(self.total_score).to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_grade() -> Grade {
        let now = Utc::now();
        Grade {
            id: "g1".to_string(),
            student_id: "s1".to_string(),
            student_name: "Ada".to_string(),
            teacher_id: "t1".to_string(),
            subject: "Math".to_string(),
            term: Term::First,
            year: 2024,
            test1: 80.0,
            test2: 90.0,
            exam: 70.0,
            assignment: 100.0,
            total_score: 0.0,
            letter_grade: String::new(),
            remarks: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_weighted_total_scenario() {
        let mut grade = sample_grade();
        grade.recalculate();
        assert_eq!(grade.total_score, 80.5);
        assert_eq!(grade.letter_grade, "B");
        assert!(grade.is_passing());
    }

    #[test]
    fn test_five_letter_boundaries() {
        assert_eq!(letter_for_score(90.0), "A");
        assert_eq!(letter_for_score(89.99), "B");
        assert_eq!(letter_for_score(80.0), "B");
        assert_eq!(letter_for_score(70.0), "C");
        assert_eq!(letter_for_score(60.0), "D");
        assert_eq!(letter_for_score(59.99), "F");
        assert_eq!(letter_for_score(0.0), "F");
    }

    #[test]
    fn test_twelve_letter_boundaries() {
        assert_eq!(weighted_letter_for_score(93.0), "A");
        assert_eq!(weighted_letter_for_score(92.99), "A-");
        assert_eq!(weighted_letter_for_score(87.0), "B+");
        assert_eq!(weighted_letter_for_score(83.0), "B");
        assert_eq!(weighted_letter_for_score(80.0), "B-");
        assert_eq!(weighted_letter_for_score(77.0), "C+");
        assert_eq!(weighted_letter_for_score(73.0), "C");
        assert_eq!(weighted_letter_for_score(70.0), "C-");
        assert_eq!(weighted_letter_for_score(67.0), "D+");
        assert_eq!(weighted_letter_for_score(63.0), "D");
        assert_eq!(weighted_letter_for_score(60.0), "D-");
        assert_eq!(weighted_letter_for_score(59.0), "F");
    }

    #[test]
    fn test_weighted_grade_uses_configured_weights() {
        let scores = ComponentValues {
            test1: 100.0,
            test2: 100.0,
            quiz: 50.0,
            assignment: 50.0,
            project: 50.0,
            participation: 50.0,
            exam: 100.0,
        };
        let weights = ComponentValues::default();
        assert!(WeightedGrade::validate(&scores, &weights).is_ok());
        // 100*(15+15+35) + 50*(10+10+10+5) = 6500 + 1750
        assert_eq!(WeightedGrade::compute_total(&scores, &weights), 82.5);
        assert_eq!(weighted_letter_for_score(82.5), "B-");
    }

    #[test]
    fn test_weights_must_sum_to_hundred() {
        let weights = ComponentValues {
            exam: 50.0,
            ..ComponentValues::default()
        };
        let err = WeightedGrade::validate(&ComponentValues::default(), &weights).unwrap_err();
        assert!(err.contains("sum to 100"));
    }
}
