//! Generation service client.
//!
//! Turns a synthesized prompt into roast text through a third-party
//! text-generation API.

pub mod anthropic;

use async_trait::async_trait;
use thiserror::Error;

use roast_common::bounded::TimedOut;
use roast_common::error::AppError;

pub use anthropic::AnthropicClient;

/// Maximum number of characters of an upstream error body echoed to callers.
pub const ERROR_BODY_LIMIT: usize = 200;

#[derive(Debug, Error)]
pub enum GenerationError {
    /// The service answered with a non-success status.
    #[error("Claude error {status}: {body}")]
    Status { status: u16, body: String },

    /// Success status, but no text at the expected place in the response.
    #[error("Empty roast from Claude")]
    Empty,

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Timeout(#[from] TimedOut),
}

impl GenerationError {
    /// Build a `Status` error, keeping at most [`ERROR_BODY_LIMIT`] characters
    /// of the upstream body.
    pub fn status(status: u16, body: &str) -> Self {
        GenerationError::Status {
            status,
            body: body.chars().take(ERROR_BODY_LIMIT).collect(),
        }
    }
}

impl From<GenerationError> for AppError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::Status { .. } => AppError::UpstreamUnavailable(err.to_string()),
            GenerationError::Empty => AppError::EmptyGeneration,
            GenerationError::Http(_) | GenerationError::Timeout(_) => {
                AppError::Internal(err.to_string())
            }
        }
    }
}

/// A single-turn text generator.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Submit `prompt` and return the generated text verbatim.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}
