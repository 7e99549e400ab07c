//! 课程播放器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责加载内容并在课程之间调度。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：记录启动信息、加载全部课程并建立索引
//! 2. **课程模式**：从起始课程开始，按读者的导航逐节运行 `LessonSession`
//! 3. **考试模式**：设置了 `EXAM_ID` 时加载题库、抽题并交给 `ExamRunner`
//! 4. **全局统计**：汇总各节会话的作答结果

use anyhow::{Context, Result};
use chrono::Local;
use tokio::io::{AsyncBufRead, AsyncWrite, BufReader};
use tracing::{info, warn};

use crate::config::Config;
use crate::exam::{select_balanced, ExamResult, MockExam};
use crate::models::{load_all_lessons, load_exam_bank};
use crate::orchestrator::exam_runner::ExamRunner;
use crate::orchestrator::lesson_session::{LessonSession, SessionOutcome};
use crate::render::TerminalRenderer;
use crate::site::{LessonIndex, LoggedMetadata};
use crate::utils::logging::{log_lessons_loaded, log_startup, print_session_stats, SessionStats};

/// 应用主结构
pub struct App {
    config: Config,
    index: LessonIndex,
    renderer: TerminalRenderer,
    metadata: LoggedMetadata,
}

impl App {
    /// 初始化应用
    ///
    /// 考试模式下不加载课程
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let lessons = if config.exam_id.is_some() {
            Vec::new()
        } else {
            info!("\n📁 正在扫描课程文件...");
            let lessons = load_all_lessons(&config.lesson_folder, config.strict_content)
                .await
                .with_context(|| format!("加载课程目录 {} 失败", config.lesson_folder))?;
            log_lessons_loaded(lessons.len(), &config.lesson_folder);
            lessons
        };

        let index = LessonIndex::new(lessons)?;
        let renderer = TerminalRenderer::new()?;

        Ok(Self {
            config,
            index,
            renderer,
            metadata: LoggedMetadata,
        })
    }

    pub fn index(&self) -> &LessonIndex {
        &self.index
    }

    /// 使用标准输入输出运行
    pub async fn run(&self) -> Result<()> {
        let mut input = BufReader::new(tokio::io::stdin());
        let mut output = tokio::io::stdout();
        self.run_with(&mut input, &mut output).await
    }

    /// 使用给定的输入输出运行
    pub async fn run_with<R, W>(&self, input: &mut R, output: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        if let Some(exam_id) = &self.config.exam_id {
            self.run_exam(exam_id, input, output).await?;
            return Ok(());
        }

        let stats = self.run_lessons(input, output).await?;
        print_session_stats(&stats);
        Ok(())
    }

    /// 课程模式：逐节运行直到读者退出
    pub async fn run_lessons<R, W>(&self, input: &mut R, output: &mut W) -> Result<SessionStats>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut stats = SessionStats::default();

        let Some(mut lesson) = self.start_lesson() else {
            warn!("⚠️ 没有可用的课程，程序结束");
            return Ok(stats);
        };

        loop {
            let mut session = LessonSession::new(lesson, &self.index, &self.renderer, &self.metadata);
            let outcome = session.run(input, output).await?;
            stats.merge(session.stats());

            match outcome {
                SessionOutcome::Navigate(path) => {
                    lesson = self
                        .index
                        .get(&path)
                        .with_context(|| format!("导航目标 {} 不存在", path))?;
                }
                SessionOutcome::Quit => break,
            }
        }

        Ok(stats)
    }

    /// 考试模式
    pub async fn run_exam<R, W>(&self, exam_id: &str, input: &mut R, output: &mut W) -> Result<ExamResult>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let bank = load_exam_bank(&self.config.exam_folder, exam_id).await?;
        let count = self
            .config
            .exam_question_count
            .unwrap_or(bank.config.total_questions);

        let questions = select_balanced(
            &bank.questions,
            count,
            &bank.config.categories,
            &mut rand::thread_rng(),
        );
        info!("✓ 从 {} 道题中抽取了 {} 道", bank.questions.len(), questions.len());

        let mut exam = MockExam::new(bank.config, questions, Local::now());
        ExamRunner::new(&self.renderer)
            .run(&mut exam, input, output)
            .await
    }

    fn start_lesson(&self) -> Option<&crate::models::LessonPage> {
        if let Some(start) = &self.config.start_lesson {
            match self.index.find(start) {
                Some(lesson) => return Some(lesson),
                None => warn!("⚠️ 找不到起始课程 {}，从第一节开始", start),
            }
        }
        self.index.first()
    }
}
