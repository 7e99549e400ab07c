/// 日志工具模块
///
/// 提供日志格式化和输出的辅助函数
use tracing::info;

use crate::config::Config;

/// 本次运行的统计（只写日志，不保存）
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    pub lessons_opened: usize,
    pub checks_answered: usize,
    pub checks_correct: usize,
    pub quiz_answered: usize,
    pub quiz_correct: usize,
}

impl SessionStats {
    pub fn merge(&mut self, other: SessionStats) {
        self.lessons_opened += other.lessons_opened;
        self.checks_answered += other.checks_answered;
        self.checks_correct += other.checks_correct;
        self.quiz_answered += other.quiz_answered;
        self.quiz_correct += other.quiz_correct;
    }
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 课程学习模式");
    info!("📁 课程目录: {}", config.lesson_folder);
    if let Some(exam_id) = &config.exam_id {
        info!("📝 模拟考试: {} (题库目录: {})", exam_id, config.exam_folder);
    }
    info!("{}", "=".repeat(60));
}

/// 记录课程加载信息
pub fn log_lessons_loaded(total: usize, folder: &str) {
    info!("✓ 从 {} 加载了 {} 节课程", folder, total);
}

/// 打印最终统计信息
pub fn print_session_stats(stats: &SessionStats) {
    info!("{}", "=".repeat(60));
    info!("📊 本次学习统计");
    info!(
        "结束时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("📖 打开课程: {}", stats.lessons_opened);
    info!(
        "✅ 随堂检查: 答对 {}/{}",
        stats.checks_correct, stats.checks_answered
    );
    info!("✅ 测验: 答对 {}/{}", stats.quiz_correct, stats.quiz_answered);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
