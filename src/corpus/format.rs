//! Corpus file serialization: the exact inverse of the parser.

use std::fmt::Write as _;

use super::ARTICLE_MARKER;
use crate::types::ArticleRecord;

/// Serializes records into the corpus format: identifier line, body line,
/// blank-line separator between records, no trailing separator.
///
/// For records with well-formed identifiers and bodies this round-trips:
/// `parse_articles(&serialize_articles(rs)) == rs`.
pub fn serialize_articles(records: &[ArticleRecord]) -> String {
    let mut out = String::new();
    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        // Infallible for String targets.
        let _ = writeln!(out, "{}", record.link);
        let _ = writeln!(out, "{ARTICLE_MARKER}{}", record.body);
    }
    out
}
