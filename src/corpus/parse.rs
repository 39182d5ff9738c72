//! Corpus file parsing.
//!
//! Parsing fails soft: a missing, unreadable, or empty file yields an empty
//! record list with a diagnostic, never an error to the caller. The batch
//! pipeline treats "nothing parsed" as "nothing to do".

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, warn};

use super::{ARTICLE_MARKER, MIN_BODY_CHARS};
use crate::types::{ArticleLink, ArticleRecord};
use crate::types::link::LINK_MARKER;

/// Parses corpus text into article records.
///
/// The input is split on blank-line boundaries into blocks. Within a block,
/// a `Link: ` line starts a new record and discards any in-progress body; an
/// `Article: ` line starts body accumulation (inline content on the marker
/// line included); later non-marker lines in the same block are appended to
/// the body joined by single spaces. Body text is intentionally flattened to
/// one paragraph.
///
/// A record is emitted only when it has both an identifier and a trimmed
/// body longer than [`MIN_BODY_CHARS`].
pub fn parse_articles(raw: &str) -> Vec<ArticleRecord> {
    let normalized = raw.replace("\r\n", "\n").replace('\r', "\n");

    let mut records = Vec::new();

    for block in split_blocks(normalized.trim()) {
        let mut current_link: Option<ArticleLink> = None;
        let mut body_lines: Vec<&str> = Vec::new();
        let mut in_body = false;

        for line in block.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if line.starts_with(LINK_MARKER) {
                current_link = Some(ArticleLink::normalize(line));
                body_lines.clear();
                in_body = false;
            } else if let Some(inline) = line.strip_prefix(ARTICLE_MARKER) {
                body_lines.clear();
                let inline = inline.trim();
                if !inline.is_empty() {
                    body_lines.push(inline);
                }
                in_body = true;
            } else if in_body && current_link.is_some() {
                body_lines.push(line);
            }
        }

        if let Some(link) = current_link {
            let body = body_lines.join(" ").trim().to_string();
            if body.len() > MIN_BODY_CHARS {
                records.push(ArticleRecord::new(link, body));
            } else if !body.is_empty() {
                debug!(link = %link, "dropping record with too-short body");
            }
        }
    }

    records
}

/// Splits trimmed corpus text into blocks on runs of blank lines.
///
/// Separator lines may carry stray whitespace, so the boundary is any run
/// of newlines with only whitespace between them.
fn split_blocks(text: &str) -> impl Iterator<Item = &str> {
    static SEPARATOR: OnceLock<Regex> = OnceLock::new();
    let separator = SEPARATOR.get_or_init(|| Regex::new(r"\n[ \t]*\n+").expect("valid regex"));
    separator.split(text).filter(|b| !b.trim().is_empty())
}

/// Reads and parses the corpus file at `path`.
///
/// Missing, unreadable, or empty files yield an empty vec with a logged
/// diagnostic.
pub fn read_articles(path: &Path) -> Vec<ArticleRecord> {
    if !path.exists() {
        warn!(path = %path.display(), "corpus file does not exist");
        return Vec::new();
    }

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "failed to read corpus file");
            return Vec::new();
        }
    };

    if content.trim().is_empty() {
        debug!(path = %path.display(), "corpus file is empty");
        return Vec::new();
    }

    let records = parse_articles(&content);
    debug!(path = %path.display(), count = records.len(), "parsed corpus");
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn body(n: usize) -> String {
        "word ".repeat(n).trim().to_string()
    }

    #[test]
    fn parses_single_record() {
        let text = format!("Link: https://example.com/a\nArticle: {}", body(20));
        let records = parse_articles(&text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].link.url(), "https://example.com/a");
        assert_eq!(records[0].body, body(20));
    }

    #[test]
    fn parses_multiple_records_split_on_blank_lines() {
        let text = format!(
            "Link: https://example.com/a\nArticle: {}\n\nLink: https://example.com/b\nArticle: {}",
            body(20),
            body(25)
        );
        let records = parse_articles(&text);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].link.url(), "https://example.com/a");
        assert_eq!(records[1].link.url(), "https://example.com/b");
    }

    #[test]
    fn continuation_lines_join_with_single_spaces() {
        let text = "Link: https://example.com/a\nArticle: first part of the body text here\nsecond part continues the paragraph";
        let records = parse_articles(text);
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].body,
            "first part of the body text here second part continues the paragraph"
        );
    }

    #[test]
    fn marker_line_with_no_inline_content_collects_following_lines() {
        let text = "Link: https://example.com/a\nArticle:\nthe entire body arrives on continuation lines after the marker";
        let records = parse_articles(text);
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].body,
            "the entire body arrives on continuation lines after the marker"
        );
    }

    #[test]
    fn new_link_line_resets_body_accumulation() {
        // Two link lines inside one block: the second wins, the first body is discarded.
        let text = format!(
            "Link: https://example.com/a\nArticle: {}\nLink: https://example.com/b\nArticle: {}",
            body(20),
            body(30)
        );
        let records = parse_articles(&text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].link.url(), "https://example.com/b");
        assert_eq!(records[0].body, body(30));
    }

    #[test]
    fn short_body_is_dropped() {
        let text = "Link: https://example.com/a\nArticle: too short";
        assert!(parse_articles(text).is_empty());
    }

    #[test]
    fn body_without_link_is_dropped() {
        let text = format!("Article: {}", body(30));
        assert!(parse_articles(&text).is_empty());
    }

    #[test]
    fn lines_before_article_marker_are_ignored() {
        let text = format!(
            "Link: https://example.com/a\nstray line not part of the body\nArticle: {}",
            body(20)
        );
        let records = parse_articles(&text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].body, body(20));
    }

    #[test]
    fn windows_line_endings_are_normalized() {
        let text = format!(
            "Link: https://example.com/a\r\nArticle: {}\r\n\r\nLink: https://example.com/b\r\nArticle: {}",
            body(20),
            body(20)
        );
        assert_eq!(parse_articles(&text).len(), 2);
    }

    #[test]
    fn empty_input_yields_no_records() {
        assert!(parse_articles("").is_empty());
        assert!(parse_articles("   \n\n  \n").is_empty());
    }

    #[test]
    fn read_articles_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        assert!(read_articles(&dir.path().join("absent.txt")).is_empty());
    }

    #[test]
    fn read_articles_empty_file_is_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("corpus.txt");
        std::fs::write(&path, "").unwrap();
        assert!(read_articles(&path).is_empty());
    }

    #[test]
    fn read_articles_parses_file_contents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("corpus.txt");
        std::fs::write(
            &path,
            format!("Link: https://example.com/a\nArticle: {}", body(20)),
        )
        .unwrap();
        assert_eq!(read_articles(&path).len(), 1);
    }
}
