pub mod exam;
pub mod lesson;
pub mod loaders;
pub mod question;

pub use exam::{Difficulty, ExamBank, ExamQuestion, MockExamConfig};
pub use lesson::{Callout, Faq, LessonNav, LessonPage, NavDirection, NavLink, PageMeta, QuizSpec, Section};
pub use loaders::{load_all_lessons, load_exam_bank, load_lesson};
pub use question::{Question, QuestionId};
