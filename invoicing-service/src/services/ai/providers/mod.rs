//! Chat completion provider abstractions and implementations.
//!
//! A trait-based seam between the drafting flows and the model backend,
//! allowing swapping between Groq and an in-process mock.

pub mod groq;
pub mod mock;

pub use groq::{GroqConfig, GroqProvider};
pub use mock::MockChatProvider;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Request timed out")]
    Timeout,

    #[error("Network error: {0}")]
    NetworkError(String),
}

/// One chat completion request.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// Optional system message.
    pub system: Option<String>,

    /// User prompt.
    pub prompt: String,

    /// Sampling temperature.
    pub temperature: f32,

    /// Maximum output tokens.
    pub max_tokens: u32,

    /// Ask the backend to constrain output to a JSON object.
    pub json_only: bool,
}

/// Trait for chat completion providers.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Run one completion and return the raw model text.
    async fn complete(&self, request: &ChatRequest) -> Result<String, ProviderError>;
}
