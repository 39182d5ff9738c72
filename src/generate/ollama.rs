//! HTTP client for a local Ollama instance.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{GenerateError, QuestionGenerator};

/// Generator backed by Ollama's `/api/generate` endpoint.
pub struct OllamaGenerator {
    base_url: String,
    model: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl OllamaGenerator {
    /// Creates a generator pointing at an Ollama instance.
    pub fn new(base_url: &str, model: &str, timeout_secs: u64) -> Self {
        OllamaGenerator {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            client: reqwest::blocking::Client::new(),
            timeout_secs,
        }
    }
}

/// Request body for `/api/generate`.
#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

/// Response body from `/api/generate` with `stream: false`.
#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

impl QuestionGenerator for OllamaGenerator {
    fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        let url = format!("{}/api/generate", self.base_url);
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let response = self
            .client
            .post(&url)
            .timeout(Duration::from_secs(self.timeout_secs))
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    GenerateError::Timeout(self.timeout_secs)
                } else if e.is_connect() {
                    GenerateError::Connection(self.base_url.clone())
                } else {
                    GenerateError::Connection(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(GenerateError::Endpoint {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .map_err(|e| GenerateError::MalformedResponse(e.to_string()))?;

        Ok(parsed.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slash() {
        let generator = OllamaGenerator::new("http://localhost:11434/", "llama3.2", 60);
        assert_eq!(generator.base_url, "http://localhost:11434");
    }

    #[test]
    fn keeps_model_and_timeout() {
        let generator = OllamaGenerator::new("http://localhost:11434", "llama3.2", 120);
        assert_eq!(generator.model, "llama3.2");
        assert_eq!(generator.timeout_secs, 120);
    }
}
