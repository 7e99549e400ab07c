//! 单节课程的交互会话
//!
//! 依次输出正文，在每个随堂检查处等待作答，最后展示常见问题、课末测验和导航，
//! 然后进入命令循环直到读者导航离开或退出。
//! 所有作答状态只属于本次会话，重新进入课程时从未作答开始

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::checks::{option_label, parse_option_label, InlineCheck, Quiz};
use crate::error::{AppError, SelectionError};
use crate::models::lesson::{LessonPage, NavDirection};
use crate::render::TerminalRenderer;
use crate::site::{LessonIndex, PageMetadata};
use crate::utils::logging::SessionStats;

/// 会话结束方式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// 导航到另一节课程（已解析的绝对路径）
    Navigate(String),
    /// 读者退出或输入结束
    Quit,
}

/// 命令循环中的读者输入
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// 作答测验题（均为 0 起始）
    Answer { question: usize, option: usize },
    Go(NavDirection),
    Quit,
    Help,
    Empty,
    Unknown,
}

/// 解析命令：`3b`、`3 B`、`n`、`next`、`q` 等
pub fn parse_command(line: &str) -> Command {
    let line = line.trim().to_ascii_lowercase();

    match line.as_str() {
        "" => return Command::Empty,
        "n" | "next" => return Command::Go(NavDirection::Next),
        "p" | "prev" | "previous" => return Command::Go(NavDirection::Previous),
        "b" | "back" => return Command::Go(NavDirection::Back),
        "q" | "quit" | "exit" => return Command::Quit,
        "h" | "help" | "?" => return Command::Help,
        _ => {}
    }

    let digits_end = line
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(line.len());
    if digits_end == 0 || digits_end == line.len() {
        return Command::Unknown;
    }

    let question = match line[..digits_end].parse::<usize>() {
        Ok(n) if n >= 1 => n - 1,
        _ => return Command::Unknown,
    };

    match parse_option_label(&line[digits_end..]) {
        Some(option) => Command::Answer { question, option },
        None => Command::Unknown,
    }
}

/// 单节课程会话
pub struct LessonSession<'a> {
    lesson: &'a LessonPage,
    index: &'a LessonIndex,
    renderer: &'a TerminalRenderer,
    metadata: &'a dyn PageMetadata,
    stats: SessionStats,
}

impl<'a> LessonSession<'a> {
    pub fn new(
        lesson: &'a LessonPage,
        index: &'a LessonIndex,
        renderer: &'a TerminalRenderer,
        metadata: &'a dyn PageMetadata,
    ) -> Self {
        Self {
            lesson,
            index,
            renderer,
            metadata,
            stats: SessionStats::default(),
        }
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// 运行会话
    pub async fn run<R, W>(&mut self, input: &mut R, output: &mut W) -> Result<SessionOutcome>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let lesson = self.lesson;
        info!("📖 打开课程: {}", lesson.path);
        self.stats.lessons_opened += 1;
        self.metadata
            .set_page_metadata(&lesson.meta.title, &lesson.meta.description);

        write_out(output, &self.renderer.lesson_header(lesson)).await?;

        for section in &lesson.sections {
            write_out(output, &self.renderer.section(section)).await?;

            if let Some(check_id) = &section.check {
                let question = lesson
                    .find_check(check_id)
                    .with_context(|| format!("课程 {} 缺少随堂检查 {}", lesson.path, check_id))?;

                let mut check = InlineCheck::new(question.clone());
                if !self.ask_inline_check(&mut check, input, output).await? {
                    return Ok(SessionOutcome::Quit);
                }
            }
        }

        write_out(output, &self.renderer.faqs(&lesson.faqs)).await?;

        let mut quiz = match &lesson.quiz {
            Some(quiz_spec) => Some(quiz_spec.instantiate().map_err(AppError::from)?),
            None => None,
        };
        if let Some(quiz) = &quiz {
            write_out(output, &self.renderer.quiz(quiz)).await?;
        }

        write_out(output, &self.renderer.nav(&lesson.nav)).await?;
        self.command_loop(quiz.as_mut(), input, output).await
    }

    /// 随堂检查：只问一次，空行跳过
    ///
    /// 返回 false 表示输入已结束
    async fn ask_inline_check<R, W>(
        &mut self,
        check: &mut InlineCheck,
        input: &mut R,
        output: &mut W,
    ) -> Result<bool>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        write_out(output, &self.renderer.inline_check(check)).await?;
        let last = option_label(check.question().option_count() - 1);

        loop {
            write_out(output, &format!("Your answer (A-{}, Enter to skip): ", last)).await?;

            let Some(line) = read_line(input).await? else {
                return Ok(false);
            };

            if line.trim().is_empty() {
                debug!("跳过随堂检查 {}", check.question().key(0));
                return Ok(true);
            }

            let Some(option) = parse_option_label(&line) else {
                write_out(output, &format!("Please answer with a letter from A to {}.\n", last)).await?;
                continue;
            };

            let is_correct = match check.select(option) {
                Ok(feedback) => feedback.is_correct,
                Err(SelectionError::OptionOutOfRange { .. }) => {
                    write_out(output, &format!("Please answer with a letter from A to {}.\n", last)).await?;
                    continue;
                }
                Err(e) => return Err(AppError::from(e).into()),
            };

            self.stats.checks_answered += 1;
            if is_correct {
                self.stats.checks_correct += 1;
            }

            write_out(output, &self.renderer.inline_check(check)).await?;
            return Ok(true);
        }
    }

    async fn command_loop<R, W>(
        &mut self,
        mut quiz: Option<&mut Quiz>,
        input: &mut R,
        output: &mut W,
    ) -> Result<SessionOutcome>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        loop {
            write_out(output, "> ").await?;

            let Some(line) = read_line(input).await? else {
                return Ok(SessionOutcome::Quit);
            };

            match parse_command(&line) {
                Command::Empty => {}
                Command::Quit => return Ok(SessionOutcome::Quit),
                Command::Help => write_out(output, &self.renderer.help()).await?,
                Command::Unknown => {
                    write_out(output, "Unrecognised command. Type h for help.\n").await?;
                }
                Command::Go(direction) => match self.index.resolve_link(self.lesson, direction) {
                    Ok(target) => return Ok(SessionOutcome::Navigate(target.path.clone())),
                    Err(e) => {
                        warn!("⚠️ 无法导航: {}", e);
                        write_out(output, &format!("{} is not available here.\n", direction.name()))
                            .await?;
                    }
                },
                Command::Answer { question, option } => match quiz.as_deref_mut() {
                    Some(quiz) => self.answer_quiz(quiz, question, option, output).await?,
                    None => write_out(output, "This lesson has no quiz.\n").await?,
                },
            }
        }
    }

    async fn answer_quiz<W>(
        &mut self,
        quiz: &mut Quiz,
        question: usize,
        option: usize,
        output: &mut W,
    ) -> Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let is_correct = match quiz.select_for_question(question, option) {
            Ok(feedback) => feedback.is_correct,
            Err(SelectionError::QuestionOutOfRange { len, .. }) => {
                let message = format!("There is no question {}. Questions run from 1 to {}.\n", question + 1, len);
                return write_out(output, &message).await;
            }
            Err(SelectionError::OptionOutOfRange { len, .. }) => {
                let message = format!(
                    "Question {} has options A to {}.\n",
                    question + 1,
                    option_label(len.saturating_sub(1))
                );
                return write_out(output, &message).await;
            }
            Err(SelectionError::AlreadyAnswered { .. }) => {
                let message = format!("Question {} is already answered.\n", question + 1);
                return write_out(output, &message).await;
            }
        };

        self.stats.quiz_answered += 1;
        if is_correct {
            self.stats.quiz_correct += 1;
        }

        write_out(output, &self.renderer.quiz_question(quiz, question)).await?;
        if quiz.is_complete() {
            let score = quiz.score();
            info!("✓ 测验完成: {} ({})", quiz.title(), score);
            write_out(output, &self.renderer.quiz_summary(quiz.title(), &score)).await?;
        }
        Ok(())
    }
}

/// 写出并刷新
pub(crate) async fn write_out<W>(output: &mut W, text: &str) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    output.write_all(text.as_bytes()).await?;
    output.flush().await?;
    Ok(())
}

/// 读取一行；输入结束返回 None
pub(crate) async fn read_line<R>(input: &mut R) -> Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = String::new();
    let read = input.read_line(&mut line).await?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}
