pub mod content_loader;

pub use content_loader::{load_all_lessons, load_exam_bank, load_lesson};
