//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责读者交互和流程调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `course_player` - 课程播放器
//! - 管理应用生命周期（初始化、运行）
//! - 加载全部课程（Vec<LessonPage>）并建立索引
//! - 在课程之间导航，或进入模拟考试模式
//! - 输出全局统计信息
//!
//! ### `lesson_session` - 单节课程会话
//! - 输出正文并依次处理随堂检查
//! - 处理测验作答和导航命令
//! - 输出单节课程的统计信息
//!
//! ### `exam_runner` - 模拟考试
//! - 逐题作答、计时、交卷、回顾
//!
//! ## 层次关系
//!
//! ```text
//! course_player (处理 Vec<LessonPage>)
//!     ↓
//! lesson_session / exam_runner (处理单节课程 / 单场考试)
//!     ↓
//! checks / exam (作答模型：InlineCheck / Quiz / MockExam)
//!     ↓
//! models (内容：Question / LessonPage / ExamBank)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单一职责**：course_player 管调度，lesson_session 管单节课程
//! 2. **向下依赖**：编排层 → checks → models
//! 3. **无业务逻辑**：判分和锁定规则全部在 checks 层

pub mod course_player;
pub mod exam_runner;
pub mod lesson_session;

// 重新导出主要类型
pub use course_player::App;
pub use exam_runner::ExamRunner;
pub use lesson_session::{parse_command, Command, LessonSession, SessionOutcome};
