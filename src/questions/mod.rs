//! The generated-questions file: append-side format and read-side parsing.
//!
//! Each article processed by the batch runner appends one banner-delimited
//! entry to this file. The digest side reads the whole file back, keeps
//! only blocks that actually carry questions, and never mutates it.

pub mod format;
pub mod parse;

pub use format::{append_entry, QuestionsWriter};
pub use parse::{parse_question_blocks, read_question_blocks};

/// Width of the `=` banner lines delimiting each entry.
pub const BANNER_WIDTH: usize = 80;

/// Title line printed between the opening banners of every entry.
pub const BANNER_TITLE: &str = "NSDA EXTEMPORANEOUS SPEAKING QUESTIONS";

/// Body written for an article whose generated output failed validation.
pub const PLACEHOLDER_BODY: &str =
    "No valid extemp questions could be generated for this article.";
