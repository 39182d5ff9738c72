//! The question-generation collaborator and input/output shaping.
//!
//! The model is a black box behind the [`QuestionGenerator`] trait: prompt
//! text in, response text out, synchronous, may fail. Callers treat any
//! failure as empty output; generation problems are filtering outcomes for
//! the batch pipeline, never fatal errors.

pub mod chunk;
pub mod ollama;
pub mod prompt;
pub mod validate;

pub use chunk::{chunk_text, CHUNK_WORD_CEILING};
pub use ollama::OllamaGenerator;
pub use prompt::build_prompt;
pub use validate::validate_output;

use thiserror::Error;

/// Errors from a generation attempt.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Could not reach the model endpoint.
    #[error("cannot connect to model endpoint {0}")]
    Connection(String),

    /// The call exceeded the configured timeout.
    #[error("generation timed out after {0} seconds")]
    Timeout(u64),

    /// The endpoint answered with a non-success status.
    #[error("model endpoint returned status {status}: {body}")]
    Endpoint { status: u16, body: String },

    /// The response body could not be decoded.
    #[error("malformed model response: {0}")]
    MalformedResponse(String),
}

/// External text-generation collaborator.
pub trait QuestionGenerator {
    /// Generates raw model output for a prompt. Blocking; a timeout is the
    /// implementation's concern and surfaces as an error.
    fn generate(&self, prompt: &str) -> Result<String, GenerateError>;
}
