//! Domain types for the generation and digest pipelines.
//!
//! Identifiers are newtypes so an article link can never be confused with
//! free text, and the link's canonical form is enforced in one place.

pub mod article;
pub mod link;
pub mod question;

// Re-export commonly used types at the module level
pub use article::ArticleRecord;
pub use link::ArticleLink;
pub use question::{Category, Question, QuestionBlock, MIN_BLOCK_CONTENT_LEN};
