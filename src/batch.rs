//! The generation batch runner.
//!
//! Drives a bounded prefix of the pending corpus through the model, appends
//! one entry per record to the questions file as it goes, and durably
//! removes the processed prefix from the corpus afterwards. Removal is
//! unconditional for every selected record: a record that produced no
//! usable questions, or was too short to bother prompting, is dropped just
//! like a success and never re-read on a later run.

use std::path::Path;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::corpus::rewrite::RewriteError;
use crate::corpus::store::RecordStore;
use crate::generate::chunk::prompt_chunk;
use crate::generate::{build_prompt, validate_output, QuestionGenerator};
use crate::questions::QuestionsWriter;

/// Quality floor: bodies with fewer words than this are removed without a
/// generation attempt or a questions-file entry.
pub const MIN_BODY_WORDS: usize = 150;

/// For long batches the corpus is re-persisted after every this many
/// records, bounding how much work a crash can force us to redo.
pub const PERSIST_EVERY: usize = 10;

/// Outcome counts for one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Records taken from the corpus this run.
    pub processed: usize,
    /// Records that produced validated questions.
    pub generated: usize,
    /// Records below the quality floor, removed without prompting.
    pub skipped_short: usize,
    /// Records whose generation failed or failed validation.
    pub failed: usize,
}

/// A batch run fails only when durability is at stake. Generation problems
/// are per-record outcomes, not errors.
#[derive(Debug, Error)]
pub enum BatchError {
    /// The questions file could not be appended to.
    #[error("cannot append to questions file: {0}")]
    Questions(#[from] std::io::Error),

    /// The corpus rewrite failed after retries. No record removed in this
    /// run may be considered durable.
    #[error("corpus persistence failed: {0}")]
    Persist(#[from] RewriteError),
}

/// Runs one generation batch.
///
/// Questions-file entries are appended per record, so a crash mid-batch
/// loses at most the in-flight record's output. The corpus itself is
/// committed every [`PERSIST_EVERY`] records and once at the end; if the
/// final commit fails, the error propagates and nothing is claimed removed.
pub fn run_batch(
    store: &mut dyn RecordStore,
    generator: &dyn QuestionGenerator,
    questions_path: &Path,
    batch_size: usize,
) -> Result<BatchSummary, BatchError> {
    let all = store.load_pending();
    if all.is_empty() {
        info!("no pending articles, nothing to generate");
        return Ok(BatchSummary::default());
    }

    let take = batch_size.min(all.len());
    let (selected, rest) = all.split_at(take);
    info!(
        selected = selected.len(),
        remaining = rest.len(),
        "starting generation batch"
    );

    let mut writer = QuestionsWriter::open(questions_path)?;
    let mut summary = BatchSummary::default();

    for (index, record) in selected.iter().enumerate() {
        summary.processed += 1;

        if record.word_count() < MIN_BODY_WORDS {
            debug!(link = %record.link, words = record.word_count(), "below quality floor, skipping");
            summary.skipped_short += 1;
        } else {
            let chunk = prompt_chunk(&record.body);
            let validated = if chunk.split_whitespace().count() < MIN_BODY_WORDS {
                debug!(link = %record.link, "first chunk below quality floor");
                None
            } else {
                let prompt = build_prompt(&chunk);
                match generator.generate(&prompt) {
                    Ok(output) => validate_output(&output),
                    Err(error) => {
                        warn!(link = %record.link, %error, "generation failed");
                        None
                    }
                }
            };

            let headline = record.link.headline();
            writer.append_entry(&record.link, &headline, validated.as_deref())?;
            if validated.is_some() {
                summary.generated += 1;
            } else {
                summary.failed += 1;
            }
        }

        let done = index + 1;
        if done % PERSIST_EVERY == 0 && done < selected.len() {
            debug!(done, "periodic corpus persistence");
            store.commit_removal(&all[done..])?;
        }
    }

    store.commit_removal(rest)?;
    info!(
        processed = summary.processed,
        generated = summary.generated,
        skipped_short = summary.skipped_short,
        failed = summary.failed,
        remaining = rest.len(),
        "batch complete"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::store::testing::MemoryRecordStore;
    use crate::corpus::store::FileRecordStore;
    use crate::corpus::serialize_articles;
    use crate::generate::testing::StubGenerator;
    use crate::generate::GenerateError;
    use crate::questions::read_question_blocks;
    use crate::retry::RetryConfig;
    use crate::types::{ArticleLink, ArticleRecord};
    use std::time::Duration;
    use tempfile::tempdir;

    const GOOD_OUTPUT: &str = "Category: Domestic\n\
        Q1. Should the measure be extended statewide?\n\
        Category: International\n\
        Q2. What factors will shape the response abroad?\n\
        Category: Domestic\n\
        Q3. To what extent does the ruling change enforcement?";

    fn long_record(url: &str) -> ArticleRecord {
        let body = "plentiful reporting detail ".repeat(60).trim().to_string();
        ArticleRecord::new(ArticleLink::normalize(url), &body)
    }

    fn short_record(url: &str) -> ArticleRecord {
        ArticleRecord::new(
            ArticleLink::normalize(url),
            "short but above the parser's character floor for a body line",
        )
    }

    // ─── happy path ───

    #[test]
    fn processes_prefix_and_keeps_suffix() {
        let dir = tempdir().unwrap();
        let questions = dir.path().join("questions.txt");
        let mut store = MemoryRecordStore::new(vec![
            long_record("https://example.com/a"),
            long_record("https://example.com/b"),
            long_record("https://example.com/c"),
        ]);
        let generator = StubGenerator::always(GOOD_OUTPUT);

        let summary = run_batch(&mut store, &generator, &questions, 2).unwrap();

        assert_eq!(summary.processed, 2);
        assert_eq!(summary.generated, 2);
        assert_eq!(store.pending.len(), 1);
        assert_eq!(store.pending[0].link.url(), "https://example.com/c");

        let blocks = read_question_blocks(&questions);
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn second_run_drains_the_corpus() {
        let dir = tempdir().unwrap();
        let questions = dir.path().join("questions.txt");
        let mut store = MemoryRecordStore::new(vec![
            long_record("https://example.com/a"),
            long_record("https://example.com/b"),
            long_record("https://example.com/c"),
        ]);
        let generator = StubGenerator::always(GOOD_OUTPUT);

        run_batch(&mut store, &generator, &questions, 2).unwrap();
        let summary = run_batch(&mut store, &generator, &questions, 2).unwrap();

        assert_eq!(summary.processed, 1);
        assert!(store.pending.is_empty());
        assert_eq!(read_question_blocks(&questions).len(), 3);
    }

    #[test]
    fn empty_corpus_is_a_no_op() {
        let dir = tempdir().unwrap();
        let questions = dir.path().join("questions.txt");
        let mut store = MemoryRecordStore::new(Vec::new());
        let generator = StubGenerator::always(GOOD_OUTPUT);

        let summary = run_batch(&mut store, &generator, &questions, 2).unwrap();
        assert_eq!(summary, BatchSummary::default());
        assert_eq!(generator.call_count(), 0);
        assert!(!questions.exists());
    }

    // ─── per-record outcomes ───

    #[test]
    fn short_records_are_removed_without_prompting() {
        let dir = tempdir().unwrap();
        let questions = dir.path().join("questions.txt");
        let mut store = MemoryRecordStore::new(vec![
            short_record("https://example.com/short"),
            long_record("https://example.com/long"),
        ]);
        let generator = StubGenerator::always(GOOD_OUTPUT);

        let summary = run_batch(&mut store, &generator, &questions, 2).unwrap();

        assert_eq!(summary.skipped_short, 1);
        assert_eq!(summary.generated, 1);
        assert_eq!(generator.call_count(), 1);
        assert!(store.pending.is_empty());

        // The short record left no entry at all in the questions file.
        let content = std::fs::read_to_string(&questions).unwrap();
        assert!(!content.contains("example.com/short"));
    }

    #[test]
    fn generation_failure_writes_placeholder_and_still_removes() {
        let dir = tempdir().unwrap();
        let questions = dir.path().join("questions.txt");
        let mut store = MemoryRecordStore::new(vec![long_record("https://example.com/a")]);
        let generator = StubGenerator::new(vec![Err(GenerateError::Timeout(120))]);

        let summary = run_batch(&mut store, &generator, &questions, 2).unwrap();

        assert_eq!(summary.failed, 1);
        assert_eq!(summary.generated, 0);
        assert!(store.pending.is_empty());

        let content = std::fs::read_to_string(&questions).unwrap();
        assert!(content.contains("No valid extemp questions"));
        // Placeholder entries are invisible to the digest side.
        assert!(read_question_blocks(&questions).is_empty());
    }

    #[test]
    fn unanalytical_output_counts_as_failed() {
        let dir = tempdir().unwrap();
        let questions = dir.path().join("questions.txt");
        let mut store = MemoryRecordStore::new(vec![long_record("https://example.com/a")]);
        let generator = StubGenerator::always("Q1. Who?\nQ2. When?\nQ3. Where?");

        let summary = run_batch(&mut store, &generator, &questions, 1).unwrap();
        assert_eq!(summary.failed, 1);
    }

    // ─── durability ───

    #[test]
    fn failed_persistence_propagates_after_entries_are_written() {
        let dir = tempdir().unwrap();
        let questions = dir.path().join("questions.txt");
        let mut store = MemoryRecordStore::failing(vec![long_record("https://example.com/a")]);
        let generator = StubGenerator::always(GOOD_OUTPUT);

        let result = run_batch(&mut store, &generator, &questions, 1);
        assert!(matches!(result, Err(BatchError::Persist(_))));

        // The questions entry was already durably appended; only the
        // corpus removal is unclaimed.
        assert_eq!(read_question_blocks(&questions).len(), 1);
    }

    #[test]
    fn long_batches_persist_periodically() {
        let dir = tempdir().unwrap();
        let questions = dir.path().join("questions.txt");
        let records: Vec<_> = (0..25)
            .map(|i| long_record(&format!("https://example.com/{i}")))
            .collect();
        let mut store = MemoryRecordStore::new(records);
        let generator = StubGenerator::always(GOOD_OUTPUT);

        run_batch(&mut store, &generator, &questions, 25).unwrap();

        // Two periodic commits (after 10 and 20) plus the final one.
        assert_eq!(store.commits.len(), 3);
        assert_eq!(store.commits[0].len(), 15);
        assert_eq!(store.commits[1].len(), 5);
        assert!(store.commits[2].is_empty());
    }

    // ─── end to end against the flat file ───

    #[test]
    fn file_store_round_trip() {
        let dir = tempdir().unwrap();
        let corpus = dir.path().join("corpus.txt");
        let questions = dir.path().join("questions.txt");
        let records = vec![
            long_record("https://example.com/a"),
            long_record("https://example.com/b"),
            long_record("https://example.com/c"),
        ];
        std::fs::write(&corpus, serialize_articles(&records)).unwrap();

        let mut store = FileRecordStore::new(&corpus)
            .with_retry(RetryConfig::new(1, Duration::from_millis(1)));
        let generator = StubGenerator::always(GOOD_OUTPUT);

        let summary = run_batch(&mut store, &generator, &questions, 2).unwrap();
        assert_eq!(summary.generated, 2);

        let remaining = store.load_pending();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].link.url(), "https://example.com/c");
        assert!(!crate::corpus::rewrite::backup_path(&corpus).exists());
    }
}
