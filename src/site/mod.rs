pub mod metadata;
pub mod navigation;

pub use metadata::{LoggedMetadata, PageMetadata};
pub use navigation::{resolve_path, LessonIndex};
