use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::error::ContentError;
use crate::models::question::{Question, QuestionId};

/// 题目难度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Basic,
    Intermediate,
    Advanced,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Basic => "basic",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        };
        f.write_str(name)
    }
}

/// 模拟考试题库中的题目
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawExamQuestion")]
pub struct ExamQuestion {
    pub question: Question,
    pub section: Option<String>,
    pub difficulty: Difficulty,
    pub topic: Option<String>,
    pub category: String,
}

#[derive(Debug, Deserialize)]
struct RawExamQuestion {
    #[serde(default)]
    id: Option<QuestionId>,
    question: String,
    options: Vec<String>,
    #[serde(alias = "correctAnswer", alias = "correctIndex")]
    correct_answer: usize,
    #[serde(default)]
    explanation: String,
    #[serde(default)]
    section: Option<String>,
    difficulty: Difficulty,
    #[serde(default)]
    topic: Option<String>,
    category: String,
}

impl TryFrom<RawExamQuestion> for ExamQuestion {
    type Error = ContentError;

    fn try_from(raw: RawExamQuestion) -> Result<Self, Self::Error> {
        let question = Question::new(
            raw.id,
            raw.question,
            raw.options,
            raw.correct_answer,
            raw.explanation,
        )?;

        Ok(Self {
            question,
            section: raw.section,
            difficulty: raw.difficulty,
            topic: raw.topic,
            category: raw.category,
        })
    }
}

/// 时间限制上限（秒），一周
pub const MAX_TIME_LIMIT_SECS: u64 = 7 * 24 * 60 * 60;

/// 模拟考试配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockExamConfig {
    pub exam_id: String,
    pub exam_title: String,
    /// 每次抽取的题目数量
    pub total_questions: usize,
    /// 时间限制（秒）
    pub time_limit: u64,
    /// 及格线（百分比）
    pub pass_threshold: u32,
    /// 考试结束后返回的路径
    #[serde(default)]
    pub exit_path: Option<String>,
    pub categories: Vec<String>,
}

/// 模拟考试题库
#[derive(Debug, Clone, Deserialize)]
pub struct ExamBank {
    pub config: MockExamConfig,
    pub questions: Vec<ExamQuestion>,
}

impl ExamBank {
    /// 校验题库配置
    pub fn validate(&self) -> Result<(), ContentError> {
        let invalid = |reason: String| ContentError::InvalidExam {
            exam_id: self.config.exam_id.clone(),
            reason,
        };

        if self.questions.is_empty() {
            return Err(invalid("题库为空".to_string()));
        }

        if self.config.total_questions == 0 {
            return Err(invalid("totalQuestions 必须大于 0".to_string()));
        }

        if self.config.time_limit == 0 || self.config.time_limit > MAX_TIME_LIMIT_SECS {
            return Err(invalid(format!(
                "timeLimit {} 必须在 1 到 {} 秒之间",
                self.config.time_limit, MAX_TIME_LIMIT_SECS
            )));
        }

        let mut listed = HashSet::new();
        for category in &self.config.categories {
            if !listed.insert(category.as_str()) {
                return Err(invalid(format!("categories 中的分类「{}」重复", category)));
            }
        }

        if self.config.pass_threshold > 100 {
            return Err(invalid(format!(
                "passThreshold {} 超过 100",
                self.config.pass_threshold
            )));
        }

        let categories: HashSet<&str> = self.config.categories.iter().map(String::as_str).collect();
        let mut seen = HashSet::new();
        for (position, item) in self.questions.iter().enumerate() {
            if !categories.contains(item.category.as_str()) {
                return Err(invalid(format!(
                    "题目 {} 的分类「{}」不在 categories 中",
                    item.question.key(position),
                    item.category
                )));
            }

            let key = item.question.key(position);
            if !seen.insert(key.clone()) {
                return Err(ContentError::DuplicateId { id: key });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BANK: &str = r#"
[config]
examId = "coshh-awareness"
examTitle = "COSHH Awareness Mock Examination"
totalQuestions = 2
timeLimit = 1800
passThreshold = 80
categories = ["Understanding COSHH", "Control Measures & PPE"]

[[questions]]
id = 1
question = "What does the acronym COSHH stand for?"
options = ["Control of Substances Hazardous to Health", "Care of Substances Harmful to Humans"]
correctAnswer = 0
explanation = "COSHH stands for Control of Substances Hazardous to Health."
section = "Module 1"
difficulty = "basic"
topic = "COSHH definition"
category = "Understanding COSHH"

[[questions]]
id = 2
question = "Which control comes first in the hierarchy?"
options = ["PPE", "Elimination"]
correctAnswer = 1
difficulty = "intermediate"
category = "Control Measures & PPE"
"#;

    #[test]
    fn test_parse_exam_bank() {
        let bank: ExamBank = toml::from_str(BANK).unwrap();

        assert!(bank.validate().is_ok());
        assert_eq!(bank.config.time_limit, 1800);
        assert_eq!(bank.questions[1].difficulty, Difficulty::Intermediate);
        assert_eq!(bank.questions[0].category, "Understanding COSHH");
    }

    #[test]
    fn test_unknown_category_fails() {
        let mut bank: ExamBank = toml::from_str(BANK).unwrap();
        bank.questions[0].category = "Fire Safety".to_string();

        assert!(matches!(
            bank.validate(),
            Err(ContentError::InvalidExam { .. })
        ));
    }

    #[test]
    fn test_time_limit_out_of_range_fails() {
        let mut bank: ExamBank = toml::from_str(BANK).unwrap();

        bank.config.time_limit = 10_000_000_000_000_000;
        assert!(matches!(
            bank.validate(),
            Err(ContentError::InvalidExam { .. })
        ));

        bank.config.time_limit = 0;
        assert!(bank.validate().is_err());

        bank.config.time_limit = MAX_TIME_LIMIT_SECS;
        assert!(bank.validate().is_ok());
    }

    #[test]
    fn test_duplicate_category_fails() {
        let mut bank: ExamBank = toml::from_str(BANK).unwrap();
        bank.config.categories.push("Understanding COSHH".to_string());

        assert!(matches!(
            bank.validate(),
            Err(ContentError::InvalidExam { .. })
        ));
    }

    #[test]
    fn test_threshold_over_hundred_fails() {
        let mut bank: ExamBank = toml::from_str(BANK).unwrap();
        bank.config.pass_threshold = 120;

        assert!(bank.validate().is_err());
    }
}
