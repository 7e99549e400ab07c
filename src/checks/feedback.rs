use crate::checks::answer::AnswerState;
use crate::models::question::Question;

/// 选项在界面上的标记
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMark {
    /// 尚未作答
    Pending,
    /// 正确选项（无论读者是否选中）
    Correct,
    /// 读者选中的错误选项
    Incorrect,
    /// 作答后其余选项
    Neutral,
}

/// 单个选项的展示数据
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView<'a> {
    pub index: usize,
    pub label: char,
    pub text: &'a str,
    pub selected: bool,
    pub mark: OptionMark,
}

/// 作答后的反馈
///
/// 同时包含“读者选了哪个”和“哪个是正确答案”，解析总是展示
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback<'a> {
    pub selected: usize,
    pub correct_index: usize,
    pub is_correct: bool,
    pub explanation: &'a str,
    pub options: Vec<OptionView<'a>>,
}

/// 选项标签：A, B, C, …
pub fn option_label(index: usize) -> char {
    if index < 26 {
        (b'A' + index as u8) as char
    } else {
        '?'
    }
}

/// 解析读者输入的选项（字母或从 1 开始的数字），返回 0 起始索引
///
/// 不做范围检查，越界交给作答槽位报错
pub fn parse_option_label(input: &str) -> Option<usize> {
    let input = input.trim();
    let mut chars = input.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => {
            Some((c.to_ascii_uppercase() as u8 - b'A') as usize)
        }
        _ => input
            .parse::<usize>()
            .ok()
            .filter(|n| *n >= 1)
            .map(|n| n - 1),
    }
}

/// 按作者给定顺序生成选项展示数据
///
/// 纯函数：同样的题目与状态总是得到同样的结果
pub fn option_views(question: &Question, state: AnswerState) -> Vec<OptionView<'_>> {
    let selected = state.selected();

    question
        .options()
        .iter()
        .enumerate()
        .map(|(index, text)| {
            let mark = match selected {
                None => OptionMark::Pending,
                Some(_) if question.is_correct(index) => OptionMark::Correct,
                Some(choice) if choice == index => OptionMark::Incorrect,
                Some(_) => OptionMark::Neutral,
            };

            OptionView {
                index,
                label: option_label(index),
                text: text.as_str(),
                selected: selected == Some(index),
                mark,
            }
        })
        .collect()
}

/// 未作答但需要公布答案时的选项展示（考试回顾）
pub fn revealed_views(question: &Question) -> Vec<OptionView<'_>> {
    option_views(question, AnswerState::Unanswered)
        .into_iter()
        .map(|mut view| {
            view.mark = if question.is_correct(view.index) {
                OptionMark::Correct
            } else {
                OptionMark::Neutral
            };
            view
        })
        .collect()
}

/// 已选定 `selected` 时的反馈
pub fn answered_feedback(question: &Question, selected: usize) -> Feedback<'_> {
    Feedback {
        selected,
        correct_index: question.correct_index(),
        is_correct: question.is_correct(selected),
        explanation: question.explanation(),
        options: option_views(question, AnswerState::Answered { selected }),
    }
}

/// 作答后的反馈；未作答返回 None
pub fn feedback_for(question: &Question, state: AnswerState) -> Option<Feedback<'_>> {
    state
        .selected()
        .map(|selected| answered_feedback(question, selected))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question() -> Question {
        Question::new(
            None,
            "Which letter?",
            vec!["A".into(), "B".into(), "C".into(), "D".into()],
            1,
            "B is right because...",
        )
        .unwrap()
    }

    #[test]
    fn test_unanswered_views_are_pending() {
        let q = question();
        let views = option_views(&q, AnswerState::Unanswered);

        assert_eq!(views.len(), 4);
        assert!(views.iter().all(|v| v.mark == OptionMark::Pending && !v.selected));
        assert!(feedback_for(&q, AnswerState::Unanswered).is_none());
    }

    #[test]
    fn test_wrong_answer_marks_both_choice_and_correct() {
        let q = question();
        let feedback = feedback_for(&q, AnswerState::Answered { selected: 3 }).unwrap();

        assert!(!feedback.is_correct);
        assert_eq!(feedback.options[3].mark, OptionMark::Incorrect);
        assert!(feedback.options[3].selected);
        assert_eq!(feedback.options[1].mark, OptionMark::Correct);
        assert!(!feedback.options[1].selected);
        assert_eq!(feedback.options[0].mark, OptionMark::Neutral);
        assert_eq!(feedback.explanation, "B is right because...");
    }

    #[test]
    fn test_views_are_stable_between_renders() {
        let q = question();
        let state = AnswerState::Answered { selected: 2 };

        assert_eq!(option_views(&q, state), option_views(&q, state));
    }

    #[test]
    fn test_revealed_views_mark_only_the_answer() {
        let q = question();
        let views = revealed_views(&q);

        assert_eq!(views[1].mark, OptionMark::Correct);
        assert!(views.iter().all(|v| !v.selected));
        assert!(views.iter().filter(|v| v.mark == OptionMark::Correct).count() == 1);
    }

    #[test]
    fn test_parse_option_label() {
        assert_eq!(parse_option_label("a"), Some(0));
        assert_eq!(parse_option_label(" D "), Some(3));
        assert_eq!(parse_option_label("2"), Some(1));
        assert_eq!(parse_option_label("0"), None);
        assert_eq!(parse_option_label("ab"), None);
        assert_eq!(parse_option_label(""), None);
    }

    #[test]
    fn test_option_label() {
        assert_eq!(option_label(0), 'A');
        assert_eq!(option_label(3), 'D');
    }
}
