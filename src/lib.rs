//! # Course Quiz
//!
//! 一个在终端中学习课程、作答随堂检查和测验的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 内容层（Models）
//! - `models/` - 课程、题目和考试题库的数据结构，以及 TOML/JSON 加载
//! - `Question` - 单选题记录，构造时校验选项数量和正确答案索引
//!
//! ### ② 作答层（Checks / Exam）
//! - `checks/` - 作答状态、反馈、随堂检查（`InlineCheck`）、测验（`Quiz`）
//! - `exam/` - 模拟考试的抽题、计时和判分
//!
//! ### ③ 展示层（Render / Site）
//! - `render/` - HTML 实体解码和终端文本渲染
//! - `site/` - 页面元数据和课程间导航
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/course_player` - 应用入口，课程调度
//! - `orchestrator/lesson_session` - 单节课程会话
//! - `orchestrator/exam_runner` - 模拟考试流程
//!
//! ## 模块结构

pub mod checks;
pub mod config;
pub mod error;
pub mod exam;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod render;
pub mod site;
pub mod utils;

// 重新导出常用类型
pub use checks::{AnswerState, Feedback, InlineCheck, Quiz, Score};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use exam::{ExamResult, MockExam};
pub use models::{ExamBank, LessonPage, Question, QuestionId};
pub use orchestrator::App;
