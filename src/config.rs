//! Runtime configuration, read once at startup from the environment.

use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

use crate::digest::MAX_BLOCKS_PER_DIGEST;

/// Default number of articles taken per generation run. Generation is the
/// expensive step, so runs stay small.
pub const DEFAULT_GEN_BATCH_SIZE: usize = 2;

/// Default model request timeout, generous because local inference on a
/// long prompt can take minutes.
pub const DEFAULT_MODEL_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Delivery needs a sender address.
    #[error("SENDER_EMAIL is not set")]
    MissingSender,

    /// Delivery needs at least one recipient.
    #[error("RECIPIENT_EMAILS is not set or empty")]
    MissingRecipients,
}

/// All runtime settings. Everything has a default except the delivery
/// addresses, which are only required by the send path and checked there.
#[derive(Debug, Clone)]
pub struct Config {
    /// Corpus of pending articles (consumed by generation runs).
    pub input_file: PathBuf,
    /// Append-only generated-questions file.
    pub questions_file: PathBuf,
    /// Append-only sent log.
    pub sent_log_file: PathBuf,

    /// Articles per generation run.
    pub gen_batch_size: usize,
    /// Question blocks per digest.
    pub max_blocks_per_digest: usize,

    /// Ollama endpoint and model.
    pub model_url: String,
    pub model_name: String,
    pub model_timeout_secs: u64,

    /// Delivery addresses and transport binary.
    pub sender_email: Option<String>,
    pub recipient_emails: Vec<String>,
    pub sendmail_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            input_file: PathBuf::from("news_articles.txt"),
            questions_file: PathBuf::from("extemp_questions.txt"),
            sent_log_file: PathBuf::from("sent_questions.txt"),
            gen_batch_size: DEFAULT_GEN_BATCH_SIZE,
            max_blocks_per_digest: MAX_BLOCKS_PER_DIGEST,
            model_url: "http://localhost:11434".to_string(),
            model_name: "llama3.2".to_string(),
            model_timeout_secs: DEFAULT_MODEL_TIMEOUT_SECS,
            sender_email: None,
            recipient_emails: Vec::new(),
            sendmail_path: PathBuf::from(crate::mail::DEFAULT_SENDMAIL),
        }
    }
}

impl Config {
    /// Builds a config from environment variables, falling back to the
    /// defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let defaults = Config::default();

        let recipient_emails = std::env::var("RECIPIENT_EMAILS")
            .map(|raw| parse_recipients(&raw))
            .unwrap_or_default();

        let config = Config {
            input_file: env_path("INPUT_FILE").unwrap_or(defaults.input_file),
            questions_file: env_path("EXTEMP_FILE").unwrap_or(defaults.questions_file),
            sent_log_file: env_path("SENT_LOG_FILE").unwrap_or(defaults.sent_log_file),
            gen_batch_size: env_parsed("GEN_BATCH_SIZE").unwrap_or(defaults.gen_batch_size),
            max_blocks_per_digest: env_parsed("MAX_BLOCKS_PER_DIGEST")
                .unwrap_or(defaults.max_blocks_per_digest),
            model_url: std::env::var("OLLAMA_URL").unwrap_or(defaults.model_url),
            model_name: std::env::var("OLLAMA_MODEL").unwrap_or(defaults.model_name),
            model_timeout_secs: env_parsed("OLLAMA_TIMEOUT_SECS")
                .unwrap_or(defaults.model_timeout_secs),
            sender_email: std::env::var("SENDER_EMAIL").ok().filter(|s| !s.is_empty()),
            recipient_emails,
            sendmail_path: env_path("SENDMAIL_PATH").unwrap_or(defaults.sendmail_path),
        };
        debug!(
            input = %config.input_file.display(),
            questions = %config.questions_file.display(),
            batch = config.gen_batch_size,
            "configuration loaded"
        );
        config
    }

    /// Checks the settings only the send path needs.
    pub fn validate_for_send(&self) -> Result<(&str, &[String]), ConfigError> {
        let sender = self
            .sender_email
            .as_deref()
            .ok_or(ConfigError::MissingSender)?;
        if self.recipient_emails.is_empty() {
            return Err(ConfigError::MissingRecipients);
        }
        Ok((sender, &self.recipient_emails))
    }
}

/// Comma-separated recipient list, blanks dropped.
fn parse_recipients(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var(name)
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}

fn env_parsed<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|s| s.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_usable_for_generation() {
        let config = Config::default();
        assert_eq!(config.gen_batch_size, DEFAULT_GEN_BATCH_SIZE);
        assert_eq!(config.max_blocks_per_digest, MAX_BLOCKS_PER_DIGEST);
        assert!(config.sender_email.is_none());
    }

    #[test]
    fn recipients_parse_trims_and_drops_blanks() {
        let recipients = parse_recipients(" a@example.com , b@example.com ,, ");
        assert_eq!(recipients, vec!["a@example.com", "b@example.com"]);
    }

    #[test]
    fn send_validation_requires_sender() {
        let config = Config {
            recipient_emails: vec!["a@example.com".to_string()],
            ..Config::default()
        };
        assert!(matches!(
            config.validate_for_send(),
            Err(ConfigError::MissingSender)
        ));
    }

    #[test]
    fn send_validation_requires_recipients() {
        let config = Config {
            sender_email: Some("from@example.com".to_string()),
            ..Config::default()
        };
        assert!(matches!(
            config.validate_for_send(),
            Err(ConfigError::MissingRecipients)
        ));
    }

    #[test]
    fn send_validation_passes_with_both() {
        let config = Config {
            sender_email: Some("from@example.com".to_string()),
            recipient_emails: vec!["a@example.com".to_string()],
            ..Config::default()
        };
        let (sender, recipients) = config.validate_for_send().unwrap();
        assert_eq!(sender, "from@example.com");
        assert_eq!(recipients.len(), 1);
    }
}
