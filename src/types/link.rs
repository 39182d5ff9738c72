//! The article link identifier and its canonical form.
//!
//! An article is identified by its source URL for the lifetime of the
//! system: in the corpus file, in the questions file, and in the sent log.
//! The canonical stored form is the full marker-prefixed line
//! `Link: <url>`. Historical sent logs contain a mix of bare URLs and
//! prefixed lines, so normalization accepts both and always yields the
//! prefixed form; all equality comparisons happen on canonical values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Marker prefix for identifier lines in the corpus and questions files.
pub const LINK_MARKER: &str = "Link: ";

/// Canonical article identifier: the marker-prefixed link line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleLink(String);

impl ArticleLink {
    /// Normalizes a raw entry (bare URL or marker-prefixed line) into the
    /// canonical prefixed form. Surrounding whitespace is trimmed.
    pub fn normalize(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.starts_with(LINK_MARKER) {
            ArticleLink(trimmed.to_string())
        } else {
            ArticleLink(format!("{LINK_MARKER}{trimmed}"))
        }
    }

    /// Returns the canonical line (`Link: <url>`).
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the bare URL without the marker prefix.
    pub fn url(&self) -> &str {
        self.0.strip_prefix(LINK_MARKER).unwrap_or(&self.0)
    }

    /// A readable headline derived from the URL structure, used for the
    /// `Info:` line and digest rendering.
    ///
    /// `/articles/<id>` paths (BBC style) yield the article id; `/news/`
    /// paths with a slug yield the title-cased slug; anything else falls
    /// back to the host name.
    pub fn headline(&self) -> String {
        let url = self.url();

        if let Some(rest) = url.split("/articles/").nth(1) {
            let article_id = rest.split('?').next().unwrap_or(rest);
            if !article_id.is_empty() {
                return format!("BBC News Article ({article_id})");
            }
        }

        if url.contains("/news/") {
            let parts: Vec<&str> = url.split('/').collect();
            if parts.len() > 4 {
                if let Some(slug) = parts.last().filter(|s| !s.is_empty()) {
                    let title = slug
                        .trim_end_matches(".html")
                        .split('-')
                        .map(title_case_word)
                        .collect::<Vec<_>>()
                        .join(" ");
                    return format!("News Article: {title}");
                }
            }
        }

        match host_of(url) {
            Some(domain) => format!("News Article from {domain}"),
            None => "News Article".to_string(),
        }
    }

    /// Short source name for digest display: the host without a leading
    /// `www.`, or a generic fallback when the URL has no host.
    pub fn source_name(&self) -> String {
        match host_of(self.url()) {
            Some(host) => host.trim_start_matches("www.").to_string(),
            None => "News Source".to_string(),
        }
    }
}

impl fmt::Display for ArticleLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Extracts the host portion of a URL without a full URL parser.
fn host_of(url: &str) -> Option<&str> {
    let after_scheme = url.split("://").nth(1)?;
    let host = after_scheme.split('/').next()?;
    if host.is_empty() {
        None
    } else {
        Some(host)
    }
}
