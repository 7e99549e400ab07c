use std::collections::HashSet;
use std::fmt;

use crate::checks::answer::{AnswerSlot, AnswerState};
use crate::checks::feedback::{answered_feedback, feedback_for, option_views, Feedback, OptionView};
use crate::error::{ContentError, SelectionError};
use crate::models::question::Question;

/// 测验得分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score {
    pub answered: usize,
    pub correct: usize,
    pub total: usize,
}

impl Score {
    pub fn is_complete(&self) -> bool {
        self.answered == self.total
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} correct", self.correct, self.total)
    }
}

/// 课末测验
///
/// 每道题的作答状态互相独立，读者可以按任意顺序作答；
/// 没有提交步骤、没有时间限制，测验整体从不锁定
#[derive(Debug, Clone)]
pub struct Quiz {
    title: String,
    questions: Vec<Question>,
    answers: Vec<AnswerSlot>,
}

impl Quiz {
    /// 创建测验
    ///
    /// # 错误
    /// - 题目列表为空
    /// - 列表内 id 重复
    pub fn new(title: impl Into<String>, questions: Vec<Question>) -> Result<Self, ContentError> {
        let title = title.into();

        if questions.is_empty() {
            return Err(ContentError::EmptyQuiz { title });
        }

        let mut seen = HashSet::new();
        for question in &questions {
            if let Some(id) = question.id() {
                if !seen.insert(id.clone()) {
                    return Err(ContentError::DuplicateId { id: id.to_string() });
                }
            }
        }

        let answers = vec![AnswerSlot::new(); questions.len()];
        Ok(Self {
            title,
            questions,
            answers,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// 为第 `question_index` 题（0 起始）记录作答并返回该题反馈
    ///
    /// 只影响这一道题
    pub fn select_for_question(
        &mut self,
        question_index: usize,
        option_index: usize,
    ) -> Result<Feedback<'_>, SelectionError> {
        self.check_index(question_index)?;

        let question = &self.questions[question_index];
        self.answers[question_index].record(question, option_index)?;
        Ok(answered_feedback(question, option_index))
    }

    pub fn state(&self, question_index: usize) -> Result<AnswerState, SelectionError> {
        self.check_index(question_index)?;
        Ok(self.answers[question_index].state())
    }

    /// 某题当前的反馈；未作答返回 `Ok(None)`
    pub fn feedback(&self, question_index: usize) -> Result<Option<Feedback<'_>>, SelectionError> {
        self.check_index(question_index)?;
        Ok(feedback_for(
            &self.questions[question_index],
            self.answers[question_index].state(),
        ))
    }

    pub fn options(&self, question_index: usize) -> Result<Vec<OptionView<'_>>, SelectionError> {
        self.check_index(question_index)?;
        Ok(option_views(
            &self.questions[question_index],
            self.answers[question_index].state(),
        ))
    }

    /// 当前得分
    pub fn score(&self) -> Score {
        let mut score = Score {
            total: self.questions.len(),
            ..Default::default()
        };

        for (question, slot) in self.questions.iter().zip(&self.answers) {
            if let Some(correct) = slot.is_correct(question) {
                score.answered += 1;
                if correct {
                    score.correct += 1;
                }
            }
        }

        score
    }

    pub fn is_complete(&self) -> bool {
        self.answers.iter().all(|slot| slot.state().is_answered())
    }

    fn check_index(&self, question_index: usize) -> Result<(), SelectionError> {
        if question_index >= self.questions.len() {
            return Err(SelectionError::QuestionOutOfRange {
                index: question_index,
                len: self.questions.len(),
            });
        }
        Ok(())
    }
}
