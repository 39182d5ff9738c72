//! Append-side formatting for the generated-questions file.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use crate::fsutil::{fsync_file, fsync_parent_dir};
use crate::types::ArticleLink;

use super::{BANNER_TITLE, BANNER_WIDTH, PLACEHOLDER_BODY};

/// Append-only handle on the questions file. Each entry is flushed and
/// fsynced before the call returns, so a crash mid-batch loses at most the
/// entry being written.
pub struct QuestionsWriter {
    file: File,
}

impl QuestionsWriter {
    /// Opens (or creates) the questions file for appending.
    pub fn open(path: &Path) -> io::Result<QuestionsWriter> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        // Open may have created the file; sync its directory entry so the
        // entries appended next cannot outlive the file itself.
        fsync_parent_dir(path)?;
        Ok(QuestionsWriter { file })
    }

    /// Appends one banner-delimited entry. `questions` is the validated
    /// model output, or `None` for an article whose output was rejected.
    pub fn append_entry(
        &mut self,
        link: &ArticleLink,
        info: &str,
        questions: Option<&str>,
    ) -> io::Result<()> {
        let entry = format_entry(link, info, questions);
        self.file.write_all(entry.as_bytes())?;
        self.file.flush()?;
        fsync_file(&self.file)
    }
}

/// One-shot append without holding a writer open.
pub fn append_entry(
    path: &Path,
    link: &ArticleLink,
    info: &str,
    questions: Option<&str>,
) -> io::Result<()> {
    let mut writer = QuestionsWriter::open(path)?;
    writer.append_entry(link, info, questions)
}

fn format_entry(link: &ArticleLink, info: &str, questions: Option<&str>) -> String {
    let banner = "=".repeat(BANNER_WIDTH);
    let body = match questions {
        Some(text) => text,
        None => PLACEHOLDER_BODY,
    };
    format!(
        "\n{link}\nInfo: {info}\n{banner}\n{BANNER_TITLE}\n{banner}\n{body}\n\n{banner}\n\n",
        link = link.as_str(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn link() -> ArticleLink {
        ArticleLink::normalize("https://www.bbc.com/news/articles/c1234abcd")
    }

    // ─── entry layout ───

    #[test]
    fn entry_carries_link_info_and_banners() {
        let entry = format_entry(&link(), "Some Headline", Some("Q1. Why?"));
        let banner = "=".repeat(BANNER_WIDTH);
        assert!(entry.starts_with("\nLink: https://www.bbc.com/news/articles/c1234abcd\n"));
        assert!(entry.contains("Info: Some Headline\n"));
        assert_eq!(entry.matches(&banner).count(), 3);
        assert!(entry.contains(BANNER_TITLE));
        assert!(entry.contains("Q1. Why?\n\n"));
        assert!(entry.ends_with(&format!("{banner}\n\n")));
    }

    #[test]
    fn rejected_output_gets_placeholder_body() {
        let entry = format_entry(&link(), "Some Headline", None);
        assert!(entry.contains(PLACEHOLDER_BODY));
        assert!(!entry.contains("Q1."));
    }

    // ─── writer ───

    #[test]
    fn writer_appends_across_entries() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("questions.txt");

        let mut writer = QuestionsWriter::open(&path).unwrap();
        writer
            .append_entry(&link(), "First", Some("Q1. Why?"))
            .unwrap();
        writer.append_entry(&link(), "Second", None).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Info: First"));
        assert!(content.contains("Info: Second"));
        assert!(content.contains(PLACEHOLDER_BODY));
    }

    #[test]
    fn one_shot_append_creates_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("questions.txt");

        append_entry(&path, &link(), "Headline", Some("Q1. Why?")).unwrap();
        assert!(path.exists());
    }
}
