//! 单题作答状态
//!
//! 随堂检查、课末测验和模拟考试共用同一套作答规则：
//! 首次作答即锁定，越界选项立即报错

use crate::error::SelectionError;
use crate::models::question::Question;

/// 作答状态机：`Unanswered → Answered`，没有反向转换
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnswerState {
    #[default]
    Unanswered,
    Answered { selected: usize },
}

impl AnswerState {
    pub fn selected(self) -> Option<usize> {
        match self {
            AnswerState::Unanswered => None,
            AnswerState::Answered { selected } => Some(selected),
        }
    }

    pub fn is_answered(self) -> bool {
        matches!(self, AnswerState::Answered { .. })
    }
}

/// 一道题的作答槽位
#[derive(Debug, Clone, Default)]
pub struct AnswerSlot {
    state: AnswerState,
}

impl AnswerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> AnswerState {
        self.state
    }

    /// 记录作答
    ///
    /// # 错误
    /// - `OptionOutOfRange`: 选项索引越界（不做截断）
    /// - `AlreadyAnswered`: 该题已经作答
    pub fn record(&mut self, question: &Question, option_index: usize) -> Result<(), SelectionError> {
        if option_index >= question.option_count() {
            return Err(SelectionError::OptionOutOfRange {
                index: option_index,
                len: question.option_count(),
            });
        }

        if let AnswerState::Answered { selected } = self.state {
            return Err(SelectionError::AlreadyAnswered { selected });
        }

        self.state = AnswerState::Answered {
            selected: option_index,
        };
        Ok(())
    }

    /// 是否答对；未作答返回 None
    pub fn is_correct(&self, question: &Question) -> Option<bool> {
        self.state
            .selected()
            .map(|selected| question.is_correct(selected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question() -> Question {
        Question::new(
            None,
            "Prompt",
            vec!["A".into(), "B".into(), "C".into()],
            2,
            "C",
        )
        .unwrap()
    }

    #[test]
    fn test_first_answer_locks() {
        let q = question();
        let mut slot = AnswerSlot::new();

        slot.record(&q, 0).unwrap();
        assert_eq!(
            slot.record(&q, 2),
            Err(SelectionError::AlreadyAnswered { selected: 0 })
        );
        assert_eq!(slot.state(), AnswerState::Answered { selected: 0 });
        assert_eq!(slot.is_correct(&q), Some(false));
    }

    #[test]
    fn test_out_of_range_is_rejected_without_state_change() {
        let q = question();
        let mut slot = AnswerSlot::new();

        assert_eq!(
            slot.record(&q, 3),
            Err(SelectionError::OptionOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(slot.state(), AnswerState::Unanswered);
        assert_eq!(slot.is_correct(&q), None);
    }
}
