//! LLM types: provider-neutral request options, grounded replies, errors.
//!
//! Shared by the Gemini and `OpenAI` clients. A reply carries the generated
//! text plus any web sources the provider used to ground it.

use serde::{Deserialize, Serialize};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by LLM client operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The API key environment variable is not set.
    #[error("missing API key: env var {var} not set")]
    MissingApiKey { var: String },

    /// The HTTP request to the LLM provider failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The LLM provider returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The LLM provider response body could not be deserialized.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// REQUEST / REPLY
// =============================================================================

/// Per-call generation options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateOptions {
    pub max_output_tokens: u32,
    /// Let the provider run web searches and report grounding sources.
    pub web_search: bool,
}

/// A web source the provider used to support its answer.
///
/// Both fields are optional upstream; entries without a URI are dropped
/// when rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub uri: Option<String>,
    pub title: Option<String>,
}

/// Response from an LLM generate call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GeneratedReply {
    /// Concatenated text parts; `None` when the provider returned no text.
    pub text: Option<String>,
    pub citations: Vec<Citation>,
    pub model: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
}

// =============================================================================
// LLM CHAT TRAIT
// =============================================================================

/// Provider-neutral async trait for single-prompt generation. Enables
/// mocking in tests.
#[async_trait::async_trait]
pub trait LlmChat: Send + Sync {
    /// Send one prompt to the provider.
    ///
    /// # Errors
    ///
    /// Returns an [`LlmError`] if the request fails, the provider answers
    /// with a non-2xx status, or the response is malformed.
    async fn chat(&self, prompt: &str, options: GenerateOptions) -> Result<GeneratedReply, LlmError>;
}
