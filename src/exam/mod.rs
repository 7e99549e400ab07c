pub mod selection;
pub mod session;

pub use selection::select_balanced;
pub use session::{CategoryScore, ExamResult, MockExam};
