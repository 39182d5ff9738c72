//! A parsed corpus record.

use super::ArticleLink;

/// One article from the corpus file: the identifier line plus the body
/// text flattened to a single paragraph.
///
/// Records are consumed destructively: once a record is included in a
/// processed batch it is removed from the corpus regardless of whether
/// generation produced usable output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRecord {
    /// Canonical identifier line.
    pub link: ArticleLink,

    /// Article text as a flat paragraph (internal line breaks collapsed).
    pub body: String,
}

impl ArticleRecord {
    pub fn new(link: ArticleLink, body: impl Into<String>) -> Self {
        ArticleRecord {
            link,
            body: body.into(),
        }
    }

    /// Number of whitespace-separated words in the body.
    pub fn word_count(&self) -> usize {
        self.body.split_whitespace().count()
    }
}
