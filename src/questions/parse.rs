//! Read-side parsing of the generated-questions file.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::types::{ArticleLink, Category, Question, QuestionBlock, MIN_BLOCK_CONTENT_LEN};

use super::BANNER_TITLE;

/// Parses the questions file into blocks that actually carry questions.
///
/// Blocks are keyed by `Link: ` lines; `Info: ` lines attach a headline.
/// Banner lines and the banner title are dropped. A block survives only if
/// its remaining content mentions at least one of `Q1.`/`Q2.`/`Q3.` and
/// is longer than [`MIN_BLOCK_CONTENT_LEN`] characters, which filters out
/// placeholder entries for articles that produced no valid questions.
pub fn parse_question_blocks(content: &str) -> Vec<QuestionBlock> {
    static QUESTION_LABEL: OnceLock<Regex> = OnceLock::new();
    let question_label =
        QUESTION_LABEL.get_or_init(|| Regex::new(r"Q[1-3]\.").expect("valid regex"));

    let mut raw_blocks: Vec<(ArticleLink, Option<String>, Vec<String>)> = Vec::new();
    let mut current: Option<(ArticleLink, Option<String>, Vec<String>)> = None;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(url) = line.strip_prefix("Link: ") {
            if let Some(block) = current.take() {
                raw_blocks.push(block);
            }
            current = Some((ArticleLink::normalize(url), None, Vec::new()));
        } else if let Some(info) = line.strip_prefix("Info: ") {
            if let Some((_, block_info, _)) = current.as_mut() {
                *block_info = Some(info.to_string());
            }
        } else if let Some((_, _, lines)) = current.as_mut() {
            if line.starts_with('=') || line == BANNER_TITLE {
                continue;
            }
            lines.push(line.to_string());
        }
    }
    if let Some(block) = current.take() {
        raw_blocks.push(block);
    }

    let mut blocks = Vec::new();
    for (link, info, lines) in raw_blocks {
        let body = lines.join("\n");
        if !question_label.is_match(&body) || body.trim().len() <= MIN_BLOCK_CONTENT_LEN {
            debug!(link = %link, "skipping block without usable questions");
            continue;
        }
        let questions = extract_questions(&lines);
        blocks.push(QuestionBlock {
            link,
            info,
            questions,
        });
    }
    blocks
}

/// Pairs `Category:` lines with the question line that follows each one.
fn extract_questions(lines: &[String]) -> Vec<Question> {
    let mut questions = Vec::new();
    let mut pending: Option<Question> = None;

    for line in lines {
        if let Some(label) = line.strip_prefix("Category:") {
            if let Some(question) = pending.take() {
                questions.push(question);
            }
            let label = label.trim().to_string();
            pending = Some(Question {
                category: Category::classify(&label),
                category_label: label,
                text: String::new(),
            });
        } else if line.starts_with('Q') && line.contains('.') {
            if let Some(question) = pending.as_mut() {
                question.text = line.clone();
            }
        }
    }
    if let Some(question) = pending.take() {
        questions.push(question);
    }
    questions
}

/// Reads and parses the questions file. A missing, unreadable, or empty
/// file yields no blocks; the digest side treats that as nothing to send.
pub fn read_question_blocks(path: &Path) -> Vec<QuestionBlock> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(error) => {
            warn!(path = %path.display(), %error, "cannot read questions file");
            return Vec::new();
        }
    };
    if content.trim().is_empty() {
        warn!(path = %path.display(), "questions file is empty");
        return Vec::new();
    }
    parse_question_blocks(&content)
}
