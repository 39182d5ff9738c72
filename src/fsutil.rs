//! Durability helpers for file writes.
//!
//! Both pipelines rely on flushed-and-fsynced writes: a record removed from
//! the corpus or a link appended to the sent log must survive a power loss,
//! otherwise a later run would repeat the externally-visible effect.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

/// Forces a file's contents and metadata to disk (`fsync(2)`).
pub fn fsync_file(file: &File) -> io::Result<()> {
    file.sync_all()
}

/// Forces a directory's entries to disk.
///
/// A file created or renamed into a directory is only durable once the
/// directory entry itself is synced; without this a crash can lose the file
/// even though its contents were fsynced.
pub fn fsync_dir(dir_path: &Path) -> io::Result<()> {
    let dir = OpenOptions::new().read(true).open(dir_path)?;
    dir.sync_all()
}

/// Syncs the directory containing `path`, making a newly created file's
/// directory entry durable. A bare filename resolves to the current
/// directory.
pub fn fsync_parent_dir(path: &Path) -> io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fsync_dir(parent)
}
