//! Core domain types for the word game
//!
//! Words and per-letter feedback. Pure, dependency-light types with no
//! knowledge of sessions or storage.

mod feedback;
mod word;

pub use feedback::{Feedback, LetterState, evaluate};
pub use word::{Word, WordError};
