//! Quality gate for generated question sets.
//!
//! Model output is only accepted when it carries all three numbered
//! questions and reads like analysis rather than recall. Anything else is
//! discarded and the article falls back to a placeholder entry.

/// Phrases that mark a question as analytical rather than factual recall.
/// At least [`MIN_ANALYTICAL_MARKERS`] of these must appear somewhere in
/// the output, case-insensitively.
const ANALYTICAL_MARKERS: &[&str] = &[
    "should",
    "how",
    "what are the implications",
    "to what extent",
    "why",
    "what factors",
    "how effective",
    "what impact",
    "how will",
    "what role",
    "analyze",
    "evaluate",
    "compare",
];

/// Minimum count of distinct analytical marker phrases an accepted output
/// must contain.
pub const MIN_ANALYTICAL_MARKERS: usize = 2;

/// Validates raw model output, returning the trimmed text when it passes.
///
/// Acceptance requires the literal labels `Q1.`, `Q2.`, and `Q3.` plus at
/// least two analytical marker phrases. `None` means the output is dropped,
/// not that anything failed.
pub fn validate_output(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    for label in ["Q1.", "Q2.", "Q3."] {
        if !trimmed.contains(label) {
            return None;
        }
    }

    let lowered = trimmed.to_lowercase();
    let marker_count = ANALYTICAL_MARKERS
        .iter()
        .filter(|marker| lowered.contains(*marker))
        .count();
    if marker_count < MIN_ANALYTICAL_MARKERS {
        return None;
    }

    Some(trimmed.to_string())
}
