//! Sentence-respecting word chunking for long article bodies.
//!
//! The model context is bounded, so long bodies are cut down before
//! prompting. Cuts happen only at sentence boundaries: a chunk may exceed
//! the word budget by the tail of its final sentence, but a sentence is
//! never split in the middle.

use std::sync::OnceLock;

use regex::Regex;

/// Bodies above this many words are chunked, and each chunk targets this
/// word budget. Only the first chunk is ever prompted.
pub const CHUNK_WORD_CEILING: usize = 1000;

/// Splits `text` into chunks of roughly `max_words` words, never breaking
/// inside a sentence.
///
/// Sentences are delimited by `.`, `!`, or `?` followed by whitespace. A
/// single sentence longer than the budget becomes its own oversized chunk.
pub fn chunk_text(text: &str, max_words: usize) -> Vec<String> {
    static SENTENCE_END: OnceLock<Regex> = OnceLock::new();
    let sentence_end =
        SENTENCE_END.get_or_init(|| Regex::new(r"(?s)(.*?[.!?])\s+").expect("valid regex"));

    let mut sentences: Vec<&str> = Vec::new();
    let mut consumed = 0;
    for capture in sentence_end.captures_iter(text) {
        let whole = capture.get(0).expect("capture 0 always present");
        sentences.push(capture.get(1).expect("group 1 always present").as_str());
        consumed = whole.end();
    }
    let tail = text[consumed..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }

    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_words = 0;

    for sentence in sentences {
        let words = sentence.split_whitespace().count();
        if current_words + words > max_words && !current.is_empty() {
            chunks.push(current.join(" "));
            current = vec![sentence];
            current_words = words;
        } else {
            current.push(sentence);
            current_words += words;
        }
    }

    if !current.is_empty() {
        chunks.push(current.join(" "));
    }

    chunks
}

/// Returns the portion of `body` to prompt with: the whole body when it is
/// within the ceiling, otherwise the first sentence-respecting chunk.
pub fn prompt_chunk(body: &str) -> String {
    let word_count = body.split_whitespace().count();
    if word_count > CHUNK_WORD_CEILING {
        chunk_text(body, CHUNK_WORD_CEILING)
            .into_iter()
            .next()
            .unwrap_or_default()
    } else {
        body.to_string()
    }
}
