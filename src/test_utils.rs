//! Shared test utilities and arbitrary generators for property-based testing.

use crate::types::{ArticleLink, ArticleRecord};
use proptest::prelude::*;

/// A plausible article URL for link-level properties.
pub fn arb_url() -> impl Strategy<Value = String> {
    "[a-z]{3,10}(-[a-z]{3,10}){0,3}"
        .prop_map(|slug| format!("https://www.example.com/news/world/{slug}"))
}

pub fn arb_link() -> impl Strategy<Value = ArticleLink> {
    arb_url().prop_map(|url| ArticleLink::normalize(&url))
}

/// A corpus record that round-trips exactly through serialize and parse:
/// the body is a single line of plain words, long enough to clear the
/// parser's character floor and stable under trimming.
pub fn arb_article_record() -> impl Strategy<Value = ArticleRecord> {
    (arb_link(), prop::collection::vec("[a-z]{4,9}", 12..25))
        .prop_map(|(link, words)| ArticleRecord::new(link, words.join(" ")))
}
