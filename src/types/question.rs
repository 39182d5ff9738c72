//! Question blocks parsed from the generation output file.

use std::fmt;

use super::ArticleLink;

/// Minimum textual content for a question block to be considered complete.
pub const MIN_BLOCK_CONTENT_LEN: usize = 50;

/// Three-way topical category for a question.
///
/// Derived from the free-text label the model emits; "mixed" is the default
/// whenever the label is ambiguous or names both areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Domestic,
    International,
    Mixed,
}

impl Category {
    /// Classifies a free-text category label by substring matching.
    pub fn classify(label: &str) -> Category {
        let lower = label.to_lowercase();
        let domestic = lower.contains("domestic");
        let international = lower.contains("international");
        match (domestic, international) {
            (true, false) => Category::Domestic,
            (false, true) => Category::International,
            _ => Category::Mixed,
        }
    }

    /// Lowercase name used as a styling class in the HTML digest.
    pub fn css_class(&self) -> &'static str {
        match self {
            Category::Domestic => "domestic",
            Category::International => "international",
            Category::Mixed => "mixed",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Domestic => write!(f, "Domestic"),
            Category::International => write!(f, "International"),
            Category::Mixed => write!(f, "Mixed"),
        }
    }
}

/// A single generated question with its category label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// The label text as emitted by the model (e.g. "Domestic").
    pub category_label: String,

    /// Classified category.
    pub category: Category,

    /// The question line, including its `Q<n>.` ordinal.
    pub text: String,
}

/// One article's worth of questions from the output file.
///
/// A block is only constructed by the parser when it is complete: non-empty
/// link, at least one well-formed question line, and content above
/// [`MIN_BLOCK_CONTENT_LEN`]. Incomplete blocks are dropped at parse time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBlock {
    /// Canonical article identifier, the digest dedupe key.
    pub link: ArticleLink,

    /// Optional `Info:` headline line.
    pub info: Option<String>,

    /// Questions in emission order.
    pub questions: Vec<Question>,
}

impl QuestionBlock {
    /// Total number of questions in the block.
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }
}
