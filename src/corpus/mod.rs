//! The article corpus: a flat file doubling as durable store and work queue.
//!
//! This module implements the reader/writer pair for the corpus format and
//! the crash-safe rewrite protocol that removes processed records:
//! - [`parse`]: blank-line-separated record blocks into [`ArticleRecord`]s
//! - [`format`]: the exact inverse serialization (round-trip safe)
//! - [`rewrite`]: backup-before-write, write-verify, rollback-on-mismatch
//! - [`store`]: the `RecordStore` seam over the file-as-queue semantics
//!
//! # Corpus format
//!
//! ```text
//! Link: <url>
//! Article: <body text...>
//!
//! Link: <url>
//! Article: <body text...>
//! ```
//!
//! No trailing separator after the final record.

pub mod format;
pub mod parse;
pub mod rewrite;
pub mod store;

pub use format::serialize_articles;
pub use parse::{parse_articles, read_articles};
pub use rewrite::{rewrite_corpus, rewrite_with_retry, RewriteError};
pub use store::{FileRecordStore, RecordStore};

/// Marker prefix for body lines in the corpus file.
pub const ARTICLE_MARKER: &str = "Article: ";

/// Minimum trimmed body length for a record to be emitted by the parser.
///
/// Guards against truncated or placeholder entries.
pub const MIN_BODY_CHARS: usize = 50;
