//! Crash-safe corpus rewriting with backup, verification, and rollback.
//!
//! The corpus file is the work queue; rewriting it to drop processed
//! records is the one destructive operation in the generation pipeline.
//! The protocol bounds the damage a crash or bad write can do:
//!
//! 1. Copy the current file to `<path>.backup`.
//! 2. Write the keep-set in the corpus format, flush, fsync.
//! 3. Re-parse the just-written file and compare record counts.
//! 4. On match: delete the backup and report success.
//!    On mismatch or IO error: restore the original from the backup and
//!    report failure.
//!
//! From the caller's perspective the corpus is never left partially
//! written: either the new content is durable and verified, or the old
//! content is back in place. A verification failure is fatal to the current
//! run; callers must not mark any record as processed afterwards.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::format::serialize_articles;
use super::parse::parse_articles;
use crate::fsutil::{fsync_file, fsync_parent_dir};
use crate::retry::{retry, RetryConfig};
use crate::types::ArticleRecord;

/// Errors from the corpus rewrite protocol.
#[derive(Debug, Error)]
pub enum RewriteError {
    /// IO failure during backup, write, or restore.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The re-parsed file did not contain the expected record count.
    /// The original content has been restored from backup.
    #[error("write verification failed: expected {expected} records, found {found}")]
    VerificationFailed { expected: usize, found: usize },
}

/// Result type for rewrite operations.
pub type Result<T> = std::result::Result<T, RewriteError>;

/// Sibling backup path for a corpus file.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_os_string();
    os.push(".backup");
    PathBuf::from(os)
}

/// Sibling fallback path used when every rewrite attempt fails.
pub fn fallback_path(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_os_string();
    os.push(".remaining");
    PathBuf::from(os)
}

/// Rewrites the corpus file to contain exactly `keep`, with backup,
/// write-verify, and rollback.
///
/// On success any backup has been consumed (deleted). On failure the
/// original content has been restored from the backup where one existed,
/// and the backup file is left in place as a manual-recovery artifact.
pub fn rewrite_corpus(path: &Path, keep: &[ArticleRecord]) -> Result<()> {
    rewrite_with_read_back(path, keep, |p| std::fs::read_to_string(p))
}

/// Rewrite with an injectable verification read. Once the new content is
/// written, every error takes the restore path: the file must hold either
/// the verified new content or the original, never an unverified write.
fn rewrite_with_read_back<R>(path: &Path, keep: &[ArticleRecord], read_back: R) -> Result<()>
where
    R: Fn(&Path) -> io::Result<String>,
{
    let backup = backup_path(path);

    if path.exists() {
        std::fs::copy(path, &backup)?;
        debug!(backup = %backup.display(), "created corpus backup");
    }

    if let Err(err) = write_serialized(path, keep) {
        warn!(error = %err, "corpus write failed, restoring from backup");
        restore_from_backup(path, &backup);
        return Err(err.into());
    }

    // Verify by re-parsing with the same reader the pipeline uses.
    let written = match read_back(path) {
        Ok(written) => written,
        Err(err) => {
            warn!(error = %err, "verification read failed, restoring from backup");
            restore_from_backup(path, &backup);
            return Err(err.into());
        }
    };
    let found = parse_articles(&written).len();
    if found != keep.len() {
        error!(
            expected = keep.len(),
            found, "write verification mismatch, restoring from backup"
        );
        restore_from_backup(path, &backup);
        return Err(RewriteError::VerificationFailed {
            expected: keep.len(),
            found,
        });
    }

    if backup.exists() {
        if let Err(err) = std::fs::remove_file(&backup) {
            // Not fatal: the rewrite is verified; a stale backup is only clutter.
            warn!(error = %err, backup = %backup.display(), "failed to remove backup");
        }
    }

    info!(path = %path.display(), records = keep.len(), "corpus rewritten and verified");
    Ok(())
}

fn write_serialized(path: &Path, keep: &[ArticleRecord]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(serialize_articles(keep).as_bytes())?;
    file.flush()?;
    fsync_file(&file)?;
    // The file may have just been created; its directory entry must be
    // durable too.
    fsync_parent_dir(path)
}

fn restore_from_backup(path: &Path, backup: &Path) {
    if !backup.exists() {
        return;
    }
    match std::fs::copy(backup, path) {
        Ok(_) => info!(path = %path.display(), "restored corpus from backup"),
        Err(err) => error!(error = %err, "failed to restore corpus from backup"),
    }
}

/// Rewrites with the bounded retry policy (default 3 attempts, 2 s apart).
///
/// When every attempt fails, the keep-set is written to the
/// `<path>.remaining` fallback file so no records are lost, and the last
/// error is returned. Callers must treat that as "no records were durably
/// removed".
pub fn rewrite_with_retry(
    path: &Path,
    keep: &[ArticleRecord],
    config: RetryConfig,
) -> Result<()> {
    let outcome = retry(config, "corpus rewrite", || rewrite_corpus(path, keep));

    if let Err(err) = &outcome {
        error!(error = %err, "all rewrite attempts failed, writing fallback file");
        let fallback = fallback_path(path);
        match write_serialized(&fallback, keep) {
            Ok(()) => warn!(fallback = %fallback.display(), "wrote remaining records to fallback"),
            Err(write_err) => error!(error = %write_err, "fallback write also failed"),
        }
    }

    outcome
}
