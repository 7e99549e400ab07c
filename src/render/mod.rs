pub mod markup;
pub mod terminal;

pub use markup::Markup;
pub use terminal::TerminalRenderer;
