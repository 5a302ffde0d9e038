pub mod blocks;
pub mod catalog;
pub mod drag;
pub mod export;
pub mod format;
pub mod io;
pub mod lyrics;
pub mod store;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use blocks::{album::*, bio::*, prompt::*, *};
pub use drag::{CardBounds, DragController, DragItem, Reorder};
pub use export::{Branding, pdf::PdfError, project::ProjectError};
pub use format::generate_prompt;
pub use io::IoError;
pub use lyrics::{GenerateError, GenerationRequest, LyricsAssistant, TextGenerator};
pub use store::BlockList;
