//! The record-store seam over the file-as-queue corpus.
//!
//! The flat file doubles as durable record store and work queue. Putting
//! `load_pending`/`commit_removal` behind a trait keeps the batch runner
//! independent of the concrete format and lets tests substitute an
//! in-memory store, the same way external collaborators are traits
//! elsewhere in the crate.

use crate::retry::RetryConfig;
use crate::types::ArticleRecord;

use super::parse::read_articles;
use super::rewrite::{rewrite_with_retry, Result};
use std::path::PathBuf;

/// Durable store of pending article records.
pub trait RecordStore {
    /// Loads every pending record, in stored order. Fails soft: unreadable
    /// or missing storage yields an empty list.
    fn load_pending(&self) -> Vec<ArticleRecord>;

    /// Durably replaces the pending set with `keep` (the unprocessed
    /// suffix), removing everything else. Implementations must guarantee
    /// the store is never left partially written: on error the previous
    /// pending set is still intact.
    fn commit_removal(&mut self, keep: &[ArticleRecord]) -> Result<()>;
}

/// Flat-file implementation backed by the corpus format and the
/// backup/verify/rollback rewrite protocol.
pub struct FileRecordStore {
    path: PathBuf,
    retry: RetryConfig,
}

impl FileRecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileRecordStore {
            path: path.into(),
            retry: RetryConfig::REWRITE,
        }
    }

    /// Overrides the rewrite retry policy (tests use a fast one).
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl RecordStore for FileRecordStore {
    fn load_pending(&self) -> Vec<ArticleRecord> {
        read_articles(&self.path)
    }

    fn commit_removal(&mut self, keep: &[ArticleRecord]) -> Result<()> {
        rewrite_with_retry(&self.path, keep, self.retry)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::serialize_articles;
    use crate::types::ArticleLink;
    use std::time::Duration;
    use tempfile::tempdir;

    fn record(url: &str) -> ArticleRecord {
        ArticleRecord::new(
            ArticleLink::normalize(url),
            "a body long enough to clear the minimum character threshold easily",
        )
    }

    #[test]
    fn load_pending_reads_the_corpus_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("corpus.txt");
        let records = vec![record("https://example.com/a"), record("https://example.com/b")];
        std::fs::write(&path, serialize_articles(&records)).unwrap();

        let store = FileRecordStore::new(&path);
        assert_eq!(store.load_pending(), records);
    }

    #[test]
    fn load_pending_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = FileRecordStore::new(dir.path().join("absent.txt"));
        assert!(store.load_pending().is_empty());
    }

    #[test]
    fn commit_removal_persists_the_keep_set() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("corpus.txt");
        let records = vec![record("https://example.com/a"), record("https://example.com/b")];
        std::fs::write(&path, serialize_articles(&records)).unwrap();

        let mut store = FileRecordStore::new(&path)
            .with_retry(RetryConfig::new(1, Duration::from_millis(1)));
        store.commit_removal(&records[1..]).unwrap();

        assert_eq!(store.load_pending(), records[1..].to_vec());
    }
}
