use crate::checks::answer::{AnswerSlot, AnswerState};
use crate::checks::feedback::{answered_feedback, feedback_for, option_views, Feedback, OptionView};
use crate::error::SelectionError;
use crate::models::question::Question;

/// 随堂检查：正文中嵌入的一道题，作答后立即反馈
///
/// 状态只属于当前实例，离开课程即丢弃
#[derive(Debug, Clone)]
pub struct InlineCheck {
    question: Question,
    slot: AnswerSlot,
}

impl InlineCheck {
    pub fn new(question: Question) -> Self {
        Self {
            question,
            slot: AnswerSlot::new(),
        }
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn state(&self) -> AnswerState {
        self.slot.state()
    }

    pub fn is_answered(&self) -> bool {
        self.slot.state().is_answered()
    }

    /// 记录读者的选择并返回反馈
    pub fn select(&mut self, option_index: usize) -> Result<Feedback<'_>, SelectionError> {
        self.slot.record(&self.question, option_index)?;
        Ok(answered_feedback(&self.question, option_index))
    }

    /// 当前反馈；未作答返回 None
    pub fn feedback(&self) -> Option<Feedback<'_>> {
        feedback_for(&self.question, self.slot.state())
    }

    pub fn options(&self) -> Vec<OptionView<'_>> {
        option_views(&self.question, self.slot.state())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::feedback::OptionMark;

    fn check() -> InlineCheck {
        InlineCheck::new(
            Question::new(
                Some("letters".into()),
                "Which letter?",
                vec!["A".into(), "B".into(), "C".into(), "D".into()],
                1,
                "B is right because...",
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_selecting_correct_option() {
        let mut check = check();
        let feedback = check.select(1).unwrap();

        assert!(feedback.is_correct);
        assert_eq!(feedback.explanation, "B is right because...");
        let correct: Vec<usize> = feedback
            .options
            .iter()
            .filter(|v| v.mark == OptionMark::Correct)
            .map(|v| v.index)
            .collect();
        assert_eq!(correct, vec![1]);
        assert!(feedback.options.iter().all(|v| v.mark != OptionMark::Incorrect));
    }

    #[test]
    fn test_selecting_wrong_option() {
        let mut check = check();
        let feedback = check.select(3).unwrap();

        assert!(!feedback.is_correct);
        assert_eq!(feedback.options[3].mark, OptionMark::Incorrect);
        assert_eq!(feedback.options[1].mark, OptionMark::Correct);
        assert_eq!(feedback.explanation, "B is right because...");
    }

    #[test]
    fn test_answer_is_final() {
        let mut check = check();
        check.select(0).unwrap();

        assert!(matches!(
            check.select(1),
            Err(SelectionError::AlreadyAnswered { selected: 0 })
        ));
        assert_eq!(check.state(), AnswerState::Answered { selected: 0 });
    }

    #[test]
    fn test_out_of_range_selection_fails_fast() {
        let mut check = check();

        assert!(matches!(
            check.select(4),
            Err(SelectionError::OptionOutOfRange { index: 4, len: 4 })
        ));
        assert!(!check.is_answered());
        assert!(check.feedback().is_none());
    }
}
