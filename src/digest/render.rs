//! Digest rendering: subject line, HTML body, and plain-text fallback.
//!
//! The HTML body is self-contained (a single `<style>` block, no external
//! assets) so it survives mail clients that strip remote content. The text
//! body mirrors the banner format of the questions file itself.

use chrono::{DateTime, Local};

use crate::mail::DigestMessage;
use crate::questions::{BANNER_TITLE, BANNER_WIDTH};
use crate::types::QuestionBlock;

/// Renders a complete message for the given blocks.
pub fn render_digest(blocks: &[QuestionBlock], now: DateTime<Local>) -> DigestMessage {
    DigestMessage {
        subject: subject_line(blocks, now),
        html_body: render_html(blocks, now),
        text_body: render_text(blocks, now),
    }
}

/// Total individual questions across the blocks.
fn question_total(blocks: &[QuestionBlock]) -> usize {
    blocks.iter().map(QuestionBlock::question_count).sum()
}

/// Subject carrying the date and both counts, e.g.
/// `NSDA Extemp Questions - March 05, 2026 (3 articles, 9 questions)`.
pub fn subject_line(blocks: &[QuestionBlock], now: DateTime<Local>) -> String {
    format!(
        "NSDA Extemp Questions - {} ({} articles, {} questions)",
        now.format("%B %d, %Y"),
        blocks.len(),
        question_total(blocks),
    )
}

pub fn render_html(blocks: &[QuestionBlock], now: DateTime<Local>) -> String {
    let mut html = String::new();
    html.push_str(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<style>\n\
         body { font-family: Georgia, serif; margin: 0; background: #f4f4f2; color: #222; }\n\
         .container { max-width: 720px; margin: 0 auto; background: #ffffff; }\n\
         .header { background: #1a2e4a; color: #ffffff; padding: 24px 32px; }\n\
         .header h1 { margin: 0 0 4px 0; font-size: 22px; }\n\
         .header .stats { font-size: 14px; color: #c8d2e0; }\n\
         .block { padding: 20px 32px; border-bottom: 1px solid #e4e4e0; }\n\
         .article-link { font-size: 14px; word-break: break-all; }\n\
         .source { font-size: 13px; color: #666; margin: 4px 0 12px 0; }\n\
         .question { margin: 10px 0; padding: 10px 14px; border-left: 4px solid #999; background: #fafaf8; }\n\
         .question.domestic { border-left-color: #2e6b3f; }\n\
         .question.international { border-left-color: #1a4e8a; }\n\
         .question.mixed { border-left-color: #8a5a1a; }\n\
         .category { font-size: 12px; text-transform: uppercase; letter-spacing: 1px; color: #666; }\n\
         .text { margin: 6px 0 0 0; font-size: 15px; }\n\
         .footer { padding: 20px 32px; font-size: 12px; color: #888; }\n\
         </style>\n</head>\n<body>\n<div class=\"container\">\n",
    );

    html.push_str(&format!(
        "<div class=\"header\">\n<h1>Extemporaneous Speaking Practice</h1>\n\
         <div class=\"stats\">{date} &middot; {articles} articles &middot; {questions} questions</div>\n</div>\n",
        date = now.format("%B %d, %Y"),
        articles = blocks.len(),
        questions = question_total(blocks),
    ));

    for block in blocks {
        html.push_str("<div class=\"block\">\n");
        html.push_str(&format!(
            "<a class=\"article-link\" href=\"{url}\">{url}</a>\n<div class=\"source\">{source}</div>\n",
            url = escape_html(block.link.url()),
            source = escape_html(&block.link.source_name()),
        ));
        for question in &block.questions {
            html.push_str(&format!(
                "<div class=\"question {class}\">\n<div class=\"category\">{label}</div>\n\
                 <p class=\"text\">{text}</p>\n</div>\n",
                class = question.category.css_class(),
                label = escape_html(&question.category_label),
                text = escape_html(&question.text),
            ));
        }
        html.push_str("</div>\n");
    }

    html.push_str(&format!(
        "<div class=\"footer\">Generated on {}. Each question is meant to support a \
         seven-minute analytical speech.</div>\n</div>\n</body>\n</html>\n",
        now.format("%Y-%m-%d %H:%M:%S"),
    ));
    html
}

pub fn render_text(blocks: &[QuestionBlock], now: DateTime<Local>) -> String {
    let banner = "=".repeat(BANNER_WIDTH);
    let mut text = String::new();
    text.push_str("Daily NSDA Extemporaneous Speaking Questions\n");
    text.push_str(&format!("Generated on: {}\n", now.format("%Y-%m-%d %H:%M:%S")));
    text.push_str(&banner);
    text.push_str("\n\n");

    for (index, block) in blocks.iter().enumerate() {
        text.push_str(&format!("{}\n", block.link.as_str()));
        if let Some(info) = &block.info {
            text.push_str(&format!("Info: {info}\n"));
        }
        text.push_str(&format!("{banner}\n{BANNER_TITLE}\n{banner}\n"));
        for question in &block.questions {
            text.push_str(&format!(
                "Category: {}\n{}\n",
                question.category_label, question.text
            ));
        }
        text.push_str(&banner);
        text.push('\n');
        if index + 1 < blocks.len() {
            text.push('\n');
        }
    }
    text
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
