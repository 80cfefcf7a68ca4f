//! Configuration section definitions.

mod compiler;
mod preview;
mod serve;
mod story;

pub use compiler::CompilerConfig;
pub use preview::PreviewConfig;
pub use serve::ServeConfig;
pub use story::StoryConfig;
