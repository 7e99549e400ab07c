//! 作答交互模型
//!
//! - `answer` - 单题作答状态与锁定规则
//! - `feedback` - 选项标记与作答反馈
//! - `inline_check` - 正文中的随堂检查
//! - `quiz` - 课末测验

pub mod answer;
pub mod feedback;
pub mod inline_check;
pub mod quiz;

pub use answer::{AnswerSlot, AnswerState};
pub use feedback::{option_label, parse_option_label, Feedback, OptionMark, OptionView};
pub use inline_check::InlineCheck;
pub use quiz::{Quiz, Score};
