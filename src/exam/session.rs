use chrono::{DateTime, Duration, Local};
use std::collections::BTreeMap;

use crate::checks::answer::{AnswerSlot, AnswerState};
use crate::checks::feedback::{feedback_for, Feedback};
use crate::error::SelectionError;
use crate::models::exam::{ExamQuestion, MockExamConfig, MAX_TIME_LIMIT_SECS};

/// 单个分类的得分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CategoryScore {
    pub correct: usize,
    pub total: usize,
}

/// 考试结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamResult {
    pub correct: usize,
    pub answered: usize,
    pub total: usize,
    /// 四舍五入后的百分比
    pub percentage: u32,
    pub passed: bool,
    pub by_category: BTreeMap<String, CategoryScore>,
}

/// 一次模拟考试
///
/// 作答不即时反馈，交卷后统一批改；作答规则与测验一致（首次作答即锁定）
#[derive(Debug, Clone)]
pub struct MockExam {
    config: MockExamConfig,
    questions: Vec<ExamQuestion>,
    answers: Vec<AnswerSlot>,
    started_at: DateTime<Local>,
}

impl MockExam {
    pub fn new(config: MockExamConfig, questions: Vec<ExamQuestion>, started_at: DateTime<Local>) -> Self {
        let answers = vec![AnswerSlot::new(); questions.len()];
        Self {
            config,
            questions,
            answers,
            started_at,
        }
    }

    pub fn config(&self) -> &MockExamConfig {
        &self.config
    }

    pub fn questions(&self) -> &[ExamQuestion] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// 记录作答（不返回对错）
    pub fn select(&mut self, question_index: usize, option_index: usize) -> Result<(), SelectionError> {
        let item = self
            .questions
            .get(question_index)
            .ok_or(SelectionError::QuestionOutOfRange {
                index: question_index,
                len: self.questions.len(),
            })?;

        self.answers[question_index].record(&item.question, option_index)
    }

    pub fn state(&self, question_index: usize) -> Option<AnswerState> {
        self.answers.get(question_index).map(AnswerSlot::state)
    }

    /// 剩余时间，已超时返回零
    pub fn remaining(&self, now: DateTime<Local>) -> Duration {
        // 截断到上限，换算不会溢出
        let limit = Duration::seconds(self.config.time_limit.min(MAX_TIME_LIMIT_SECS) as i64);
        let elapsed = now - self.started_at;
        (limit - elapsed).max(Duration::zero())
    }

    pub fn is_expired(&self, now: DateTime<Local>) -> bool {
        self.remaining(now) <= Duration::zero()
    }

    /// 批改：未作答按答错计算
    pub fn result(&self) -> ExamResult {
        let mut by_category: BTreeMap<String, CategoryScore> = BTreeMap::new();
        let mut correct = 0;
        let mut answered = 0;

        for (item, slot) in self.questions.iter().zip(&self.answers) {
            let entry = by_category.entry(item.category.clone()).or_default();
            entry.total += 1;

            if let Some(is_correct) = slot.is_correct(&item.question) {
                answered += 1;
                if is_correct {
                    correct += 1;
                    entry.correct += 1;
                }
            }
        }

        let total = self.questions.len();
        let percentage = if total == 0 {
            0
        } else {
            ((correct as f64 / total as f64) * 100.0).round() as u32
        };

        ExamResult {
            correct,
            answered,
            total,
            percentage,
            passed: total > 0 && percentage >= self.config.pass_threshold,
            by_category,
        }
    }

    /// 交卷后的逐题回顾；未作答的题目没有反馈
    pub fn review(&self) -> Vec<(&ExamQuestion, Option<Feedback<'_>>)> {
        self.questions
            .iter()
            .zip(&self.answers)
            .map(|(item, slot)| (item, feedback_for(&item.question, slot.state())))
            .collect()
    }
}
