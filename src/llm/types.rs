//! LLM types: provider-neutral request/response types and errors.
//!
//! Shared by the Gemini and `OpenAI` clients. The services layer only ever
//! sees these types and the [`LlmGenerate`] trait.

use serde::{Deserialize, Serialize};

use crate::error::ErrorCode;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by LLM client operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The required API key environment variable is not set.
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

impl ErrorCode for LlmError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ConfigParse(_) => "E_CONFIG_PARSE",
            Self::MissingApiKey { .. } => "E_MISSING_API_KEY",
            Self::ApiRequest(_) => "E_API_REQUEST",
            Self::ApiResponse { .. } => "E_API_RESPONSE",
            Self::ApiParse(_) => "E_API_PARSE",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::ApiRequest(_) | Self::ApiResponse { status: 429 | 500..=599, .. })
    }
}

// =============================================================================
// STRUCTURED OUTPUT
// =============================================================================

/// A named JSON schema the model's text output must conform to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseSchema {
    pub name: String,
    pub schema: serde_json::Value,
}

// =============================================================================
// INLINE IMAGE
// =============================================================================

/// A base64 image payload returned inline by an image model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineImage {
    pub mime_type: String,
    /// Base64 body, standard alphabet, no data-URL prefix.
    pub data: String,
}

impl InlineImage {
    /// Render as a displayable `data:` URL.
    #[must_use]
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

// =============================================================================
// LLM GENERATE TRAIT
// =============================================================================

/// Provider-neutral async trait for generation calls. Enables mocking in tests.
#[async_trait::async_trait]
pub trait LlmGenerate: Send + Sync {
    /// Send a prompt to the text model, constrained to `schema`, and return
    /// the raw text the model produced.
    ///
    /// # Errors
    ///
    /// Returns an [`LlmError`] if the request fails or the provider response
    /// envelope is malformed. The returned text itself is not validated.
    async fn generate_json(&self, prompt: &str, schema: &ResponseSchema) -> Result<String, LlmError>;

    /// Send a prompt to the image model and return the first inline image,
    /// or `None` when the response carries no image.
    ///
    /// # Errors
    ///
    /// Returns an [`LlmError`] if the request fails or the response envelope
    /// is malformed.
    async fn generate_image(&self, prompt: &str, aspect_ratio: &str) -> Result<Option<InlineImage>, LlmError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
