//! 模拟考试流程
//!
//! 按顺序逐题作答，作答期间不显示对错。时间用完（包括等待输入时）
//! 或题目答完后交卷，输出成绩和逐题回顾

use anyhow::Result;
use chrono::Local;
use tokio::io::{AsyncBufRead, AsyncWrite};
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::checks::{option_label, parse_option_label};
use crate::error::{AppError, SelectionError};
use crate::exam::{ExamResult, MockExam};
use crate::orchestrator::lesson_session::{read_line, write_out};
use crate::render::TerminalRenderer;

/// 模拟考试运行器
pub struct ExamRunner<'a> {
    renderer: &'a TerminalRenderer,
}

impl<'a> ExamRunner<'a> {
    pub fn new(renderer: &'a TerminalRenderer) -> Self {
        Self { renderer }
    }

    /// 运行整场考试并返回成绩
    pub async fn run<R, W>(&self, exam: &mut MockExam, input: &mut R, output: &mut W) -> Result<ExamResult>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!(
            "📝 开始模拟考试: {} ({} 题, 限时 {} 秒)",
            exam.config().exam_title,
            exam.len(),
            exam.config().time_limit
        );

        'questions: for index in 0..exam.len() {
            if exam.is_expired(Local::now()) {
                write_out(output, "\nTime is up.\n").await?;
                break;
            }

            let item = &exam.questions()[index];
            let last = option_label(item.question.option_count() - 1);
            let text = self
                .renderer
                .exam_question(index, exam.len(), item, exam.remaining(Local::now()));
            write_out(output, &text).await?;

            loop {
                write_out(output, &format!("Answer (A-{}, Enter to skip): ", last)).await?;

                let remaining = exam.remaining(Local::now()).to_std()?;
                let line = match timeout(remaining, read_line(input)).await {
                    Ok(line) => line?,
                    Err(_) => {
                        info!("⏰ 考试时间到，自动交卷");
                        write_out(output, "\nTime is up.\n").await?;
                        break 'questions;
                    }
                };

                let Some(line) = line else {
                    debug!("输入结束，提前交卷");
                    break 'questions;
                };

                if exam.is_expired(Local::now()) {
                    write_out(output, "\nTime is up. That answer was not recorded.\n").await?;
                    break 'questions;
                }

                if line.trim().is_empty() {
                    break;
                }

                let Some(option) = parse_option_label(&line) else {
                    write_out(output, &format!("Please answer with a letter from A to {}.\n", last)).await?;
                    continue;
                };

                match exam.select(index, option) {
                    Ok(()) => break,
                    Err(SelectionError::OptionOutOfRange { .. }) => {
                        write_out(output, &format!("Please answer with a letter from A to {}.\n", last)).await?;
                    }
                    Err(e) => return Err(AppError::from(e).into()),
                }
            }
        }

        let result = exam.result();
        if result.passed {
            info!("✓ 考试通过: {}% ({}/{})", result.percentage, result.correct, result.total);
        } else {
            warn!("✗ 考试未通过: {}% ({}/{})", result.percentage, result.correct, result.total);
        }

        write_out(output, &self.renderer.exam_result(exam, &result)).await?;
        write_out(output, &self.renderer.exam_review(exam)).await?;
        if let Some(exit_path) = &exam.config().exit_path {
            write_out(output, &format!("\nReturn to: {}\n", exit_path)).await?;
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::AnswerState;
    use crate::models::exam::{Difficulty, ExamQuestion, MockExamConfig};
    use crate::models::question::Question;
    use std::time::{Duration, Instant};
    use tokio::io::{AsyncReadExt, BufReader};
    use tokio_test::io::Builder;

    fn config(time_limit: u64) -> MockExamConfig {
        MockExamConfig {
            exam_id: "coshh-awareness".to_string(),
            exam_title: "COSHH Awareness Mock Examination".to_string(),
            total_questions: 2,
            time_limit,
            pass_threshold: 80,
            exit_path: None,
            categories: vec!["Understanding COSHH".to_string()],
        }
    }

    fn item(id: u64) -> ExamQuestion {
        ExamQuestion {
            question: Question::new(
                Some(id.into()),
                format!("Question {}", id),
                vec!["Right".into(), "Wrong".into()],
                0,
                "Right is right",
            )
            .unwrap(),
            section: None,
            difficulty: Difficulty::Basic,
            topic: None,
            category: "Understanding COSHH".to_string(),
        }
    }

    #[tokio::test]
    async fn test_exam_ends_when_time_runs_out_while_waiting() {
        let renderer = TerminalRenderer::new().unwrap();
        let mut exam = MockExam::new(config(1), vec![item(1), item(2)], Local::now());

        let mut input = BufReader::new(
            Builder::new()
                .wait(Duration::from_secs(3))
                .read(b"a\n")
                .build(),
        );
        let mut output: Vec<u8> = Vec::new();

        let started = Instant::now();
        let result = ExamRunner::new(&renderer)
            .run(&mut exam, &mut input, &mut output)
            .await
            .unwrap();

        assert!(started.elapsed() < Duration::from_secs(3));
        assert_eq!(result.answered, 0);
        assert_eq!(result.total, 2);
        assert!(!result.passed);

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Time is up."));
        assert!(output.contains("NOT PASSED"));

        // 迟到的输入不会被记录
        let mut rest = String::new();
        input.read_to_string(&mut rest).await.unwrap();
        assert_eq!(rest, "a\n");
        assert_eq!(exam.state(0), Some(AnswerState::Unanswered));
    }

    #[tokio::test]
    async fn test_answers_within_time_are_recorded() {
        let renderer = TerminalRenderer::new().unwrap();
        let mut exam = MockExam::new(config(1800), vec![item(1), item(2)], Local::now());

        let mut input = BufReader::new(Builder::new().read(b"a\nb\n").build());
        let mut output: Vec<u8> = Vec::new();

        let result = ExamRunner::new(&renderer)
            .run(&mut exam, &mut input, &mut output)
            .await
            .unwrap();

        assert_eq!(result.answered, 2);
        assert_eq!(result.correct, 1);
        assert_eq!(result.percentage, 50);
        assert!(!String::from_utf8(output).unwrap().contains("Time is up."));
    }
}
