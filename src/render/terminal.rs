//! 终端渲染
//!
//! 把课程内容和作答状态渲染成纯文本，不做任何 I/O

use chrono::Duration;
use std::fmt::Write;

use crate::checks::feedback::revealed_views;
use crate::checks::{option_label, Feedback, InlineCheck, OptionMark, OptionView, Quiz, Score};
use crate::error::AppResult;
use crate::exam::{ExamResult, MockExam};
use crate::models::exam::ExamQuestion;
use crate::models::lesson::{Faq, LessonNav, LessonPage, Section};
use crate::render::markup::Markup;

const RULE_WIDTH: usize = 60;

/// 终端渲染器
#[derive(Debug, Clone)]
pub struct TerminalRenderer {
    markup: Markup,
}

impl TerminalRenderer {
    pub fn new() -> AppResult<Self> {
        Ok(Self {
            markup: Markup::new()?,
        })
    }

    fn text(&self, raw: &str) -> String {
        self.markup.decode(raw).into_owned()
    }

    /// 课程标题区
    pub fn lesson_header(&self, lesson: &LessonPage) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
        if let Some(subtitle) = &lesson.subtitle {
            let _ = writeln!(out, "{}", self.text(subtitle));
        }
        let _ = writeln!(out, "{}", self.text(&lesson.title));
        let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
        out
    }

    /// 正文章节
    pub fn section(&self, section: &Section) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "\n## {}\n", self.text(&section.heading));
        for paragraph in &section.paragraphs {
            let _ = writeln!(out, "{}\n", self.text(paragraph));
        }
        for callout in &section.callouts {
            let _ = writeln!(out, "  [{}]", self.text(&callout.title));
            let _ = writeln!(out, "  {}\n", self.text(&callout.body));
        }
        out
    }

    /// 随堂检查（未作答时只有题干和选项，作答后附带反馈）
    pub fn inline_check(&self, check: &InlineCheck) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "\n{}", "-".repeat(RULE_WIDTH));
        let _ = writeln!(out, "Quick Check: {}", self.text(check.question().prompt()));
        self.write_options(&mut out, &check.options());
        if let Some(feedback) = check.feedback() {
            self.write_feedback(&mut out, &feedback);
        }
        let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
        out
    }

    /// 整个测验
    pub fn quiz(&self, quiz: &Quiz) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "\n{}", "=".repeat(RULE_WIDTH));
        let _ = writeln!(out, "{}", self.text(quiz.title()));
        let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
        for index in 0..quiz.len() {
            out.push_str(&self.quiz_question(quiz, index));
        }
        out
    }

    /// 测验中的一道题
    pub fn quiz_question(&self, quiz: &Quiz, index: usize) -> String {
        let mut out = String::new();
        let question = &quiz.questions()[index];
        let _ = writeln!(out, "\n{}. {}", index + 1, self.text(question.prompt()));

        if let Ok(options) = quiz.options(index) {
            self.write_options(&mut out, &options);
        }
        if let Ok(Some(feedback)) = quiz.feedback(index) {
            self.write_feedback(&mut out, &feedback);
        }
        out
    }

    /// 全部作答后的汇总
    pub fn quiz_summary(&self, title: &str, score: &Score) -> String {
        format!("\n{} complete: {}\n", self.text(title), score)
    }

    pub fn faqs(&self, faqs: &[Faq]) -> String {
        if faqs.is_empty() {
            return String::new();
        }

        let mut out = String::new();
        let _ = writeln!(out, "\n## Frequently Asked Questions\n");
        for faq in faqs {
            let _ = writeln!(out, "Q: {}", self.text(&faq.question));
            let _ = writeln!(out, "A: {}\n", self.text(&faq.answer));
        }
        out
    }

    /// 底部导航
    pub fn nav(&self, nav: &LessonNav) -> String {
        let mut parts = Vec::new();
        if let Some(link) = &nav.back {
            parts.push(format!("[b] {}", self.text(&link.label)));
        }
        if let Some(link) = &nav.previous {
            parts.push(format!("[p] {}", self.text(&link.label)));
        }
        if let Some(link) = &nav.next {
            parts.push(format!("[n] {}", self.text(&link.label)));
        }
        parts.push("[q] Quit".to_string());

        format!("\n{}\n{}\n", "-".repeat(RULE_WIDTH), parts.join("   "))
    }

    pub fn help(&self) -> String {
        [
            "Commands:",
            "  <question><option>  answer a quiz question, e.g. 3b or 3 B",
            "  n / next            go to the next lesson",
            "  p / prev            go to the previous lesson",
            "  b / back            go back",
            "  q / quit            leave",
            "  h / help            show this help",
            "",
        ]
        .join("\n")
    }

    /// 模拟考试中的一道题（不显示对错）
    pub fn exam_question(
        &self,
        position: usize,
        total: usize,
        item: &ExamQuestion,
        remaining: Duration,
    ) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "\nQuestion {} of {}  [{}]  time left {}",
            position + 1,
            total,
            self.text(&item.category),
            format_duration(remaining)
        );
        let _ = writeln!(out, "{}", self.text(item.question.prompt()));
        for (index, option) in item.question.options().iter().enumerate() {
            let _ = writeln!(
                out,
                "  {}. {}",
                option_label(index),
                self.text(option)
            );
        }
        out
    }

    /// 考试成绩
    pub fn exam_result(&self, exam: &MockExam, result: &ExamResult) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "\n{}", "=".repeat(RULE_WIDTH));
        let _ = writeln!(out, "{}", self.text(&exam.config().exam_title));
        let _ = writeln!(
            out,
            "Score: {}/{} ({}%), answered {}",
            result.correct, result.total, result.percentage, result.answered
        );
        let _ = writeln!(
            out,
            "{} (pass mark {}%)",
            if result.passed { "PASSED" } else { "NOT PASSED" },
            exam.config().pass_threshold
        );
        for (category, score) in &result.by_category {
            let _ = writeln!(
                out,
                "  {}: {}/{}",
                self.text(category),
                score.correct,
                score.total
            );
        }
        let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
        out
    }

    /// 交卷后的逐题回顾
    pub fn exam_review(&self, exam: &MockExam) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "\nReview");
        for (index, (item, feedback)) in exam.review().into_iter().enumerate() {
            let _ = writeln!(out, "\n{}. {}", index + 1, self.text(item.question.prompt()));
            match feedback {
                Some(feedback) => {
                    self.write_options(&mut out, &feedback.options);
                    self.write_feedback(&mut out, &feedback);
                }
                None => {
                    self.write_options(&mut out, &revealed_views(&item.question));
                    let _ = writeln!(out, "Not answered.");
                    let _ = writeln!(out, "Explanation: {}", self.text(item.question.explanation()));
                }
            }
        }
        out
    }

    fn write_options(&self, out: &mut String, options: &[OptionView<'_>]) {
        for view in options {
            let marker = match view.mark {
                OptionMark::Correct => "  ✔ correct",
                OptionMark::Incorrect => "  ✘",
                OptionMark::Pending | OptionMark::Neutral => "",
            };
            let chosen = if view.selected { "  (your answer)" } else { "" };
            let _ = writeln!(
                out,
                "  {}. {}{}{}",
                view.label,
                self.text(view.text),
                marker,
                chosen
            );
        }
    }

    fn write_feedback(&self, out: &mut String, feedback: &Feedback<'_>) {
        let verdict = if feedback.is_correct { "Correct!" } else { "Incorrect." };
        let _ = writeln!(out, "{}", verdict);
        let _ = writeln!(out, "Explanation: {}", self.text(feedback.explanation));
    }
}

/// 格式化剩余时间为 mm:ss
pub fn format_duration(duration: Duration) -> String {
    let seconds = duration.num_seconds().max(0);
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::Question;

    fn check() -> InlineCheck {
        InlineCheck::new(
            Question::new(
                Some("letters".into()),
                "Which letter &mdash; pick one?",
                vec!["A".into(), "B".into(), "C".into(), "D".into()],
                1,
                "B is right because...",
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_unanswered_inline_check_hides_feedback() {
        let renderer = TerminalRenderer::new().unwrap();
        let out = renderer.inline_check(&check());

        assert!(out.contains("Quick Check: Which letter \u{2014} pick one?"));
        assert!(out.contains("  A. A\n"));
        assert!(!out.contains("Explanation"));
        assert!(!out.contains("✔"));
    }

    #[test]
    fn test_wrong_answer_shows_both_marks_and_explanation() {
        let renderer = TerminalRenderer::new().unwrap();
        let mut check = check();
        check.select(3).unwrap();

        let out = renderer.inline_check(&check);
        assert!(out.contains("  B. B  ✔ correct\n"));
        assert!(out.contains("  D. D  ✘  (your answer)\n"));
        assert!(out.contains("Incorrect."));
        assert!(out.contains("Explanation: B is right because..."));
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let renderer = TerminalRenderer::new().unwrap();
        let mut check = check();
        check.select(1).unwrap();

        assert_eq!(renderer.inline_check(&check), renderer.inline_check(&check));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::seconds(1805)), "30:05");
        assert_eq!(format_duration(Duration::seconds(-3)), "00:00");
    }
}
