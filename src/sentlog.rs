//! Append-only log of article links already delivered in a digest.
//!
//! The log is line-oriented and tolerant of both historical line shapes
//! (bare URLs and `Link: `-prefixed). Every line is normalized to the
//! canonical prefixed form on load, so lookups never miss because of
//! formatting drift. Appends are flushed and fsynced one line at a time;
//! a duplicate line in the file is harmless because membership is a set.

use std::collections::HashSet;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::fsutil::{fsync_file, fsync_parent_dir};
use crate::types::ArticleLink;

/// In-memory view of the sent log, bound to its backing file.
pub struct SentLog {
    path: PathBuf,
    sent: HashSet<ArticleLink>,
}

impl SentLog {
    /// Loads the log from disk. A missing or unreadable file is treated as
    /// an empty log: every block then counts as unsent, and re-sending is
    /// preferred over never sending.
    pub fn load(path: &Path) -> SentLog {
        let sent = match std::fs::read_to_string(path) {
            Ok(content) => content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(ArticleLink::normalize)
                .collect(),
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                info!(path = %path.display(), "no sent log yet, treating all blocks as new");
                HashSet::new()
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "cannot read sent log, treating as empty");
                HashSet::new()
            }
        };
        debug!(entries = sent.len(), "sent log loaded");
        SentLog {
            path: path.to_path_buf(),
            sent,
        }
    }

    /// Whether a link has already been delivered.
    pub fn contains(&self, link: &ArticleLink) -> bool {
        self.sent.contains(link)
    }

    /// Number of distinct delivered links.
    pub fn len(&self) -> usize {
        self.sent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sent.is_empty()
    }

    /// Durably appends one link in canonical form and records it in the
    /// in-memory set. The line is fsynced before this returns.
    pub fn append(&mut self, link: &ArticleLink) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", link.as_str())?;
        file.flush()?;
        fsync_file(&file)?;
        // The open above may have created the log file.
        fsync_parent_dir(&self.path)?;
        self.sent.insert(link.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn link(url: &str) -> ArticleLink {
        ArticleLink::normalize(url)
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let log = SentLog::load(&dir.path().join("sent.txt"));
        assert!(log.is_empty());
    }

    #[test]
    fn append_then_reload_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sent.txt");

        let mut log = SentLog::load(&path);
        log.append(&link("https://example.com/a")).unwrap();
        log.append(&link("https://example.com/b")).unwrap();
        assert!(log.contains(&link("https://example.com/a")));

        let reloaded = SentLog::load(&path);
        assert_eq!(reloaded.len(), 2);
        assert!(reloaded.contains(&link("https://example.com/b")));
    }

    #[test]
    fn both_line_shapes_normalize_to_one_key() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sent.txt");
        std::fs::write(
            &path,
            "https://example.com/a\nLink: https://example.com/a\n  \nLink: https://example.com/b\n",
        )
        .unwrap();

        let log = SentLog::load(&path);
        assert_eq!(log.len(), 2);
        assert!(log.contains(&link("https://example.com/a")));
        assert!(log.contains(&link("Link: https://example.com/b")));
    }

    #[test]
    fn appended_lines_carry_the_canonical_prefix() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sent.txt");

        let mut log = SentLog::load(&path);
        log.append(&link("https://example.com/a")).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Link: https://example.com/a\n");
    }

    #[test]
    fn duplicate_appends_keep_membership_stable() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sent.txt");

        let mut log = SentLog::load(&path);
        log.append(&link("https://example.com/a")).unwrap();
        log.append(&link("https://example.com/a")).unwrap();
        assert_eq!(log.len(), 1);

        // The file carries both lines; the set collapses them on reload.
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert_eq!(SentLog::load(&path).len(), 1);
    }
}
