//! Core domain types
//!
//! Words and the feedback pattern codec. Everything here is pure.

mod pattern;
mod word;

pub use pattern::{PATTERN_COUNT, Pattern};
pub use word::{WORD_LEN, Word, WordError};
