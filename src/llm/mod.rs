//! LLM: multi-provider adapter for the generative features.
//!
//! DESIGN
//! ======
//! Configured from environment variables. The `LlmClient` dispatches to
//! Gemini or an OpenAI-compatible API based on `LLM_PROVIDER`, and holds the
//! text and image model names so callers only pass prompts.

pub mod config;
pub mod gemini;
pub mod openai;
pub mod prompts;
pub mod types;

use config::{LlmConfig, LlmProviderKind};
pub use types::LlmGenerate;
use types::{InlineImage, LlmError, ResponseSchema};

// =============================================================================
// CLIENT DISPATCH
// =============================================================================

/// Concrete LLM client that dispatches to either Gemini or `OpenAI`.
///
/// Configured from environment variables by [`LlmClient::from_env`].
pub struct LlmClient {
    inner: LlmProvider,
    provider: LlmProviderKind,
    text_model: String,
    image_model: String,
}

enum LlmProvider {
    Gemini(gemini::GeminiClient),
    OpenAi(openai::OpenAiClient),
}

impl LlmClient {
    /// Build an LLM client from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client fails.
    pub fn from_env() -> Result<Self, LlmError> {
        let config = LlmConfig::from_env()?;
        Self::from_config(config)
    }

    /// Build an LLM client from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider HTTP client fails to build.
    pub fn from_config(config: LlmConfig) -> Result<Self, LlmError> {
        let inner = match config.provider {
            LlmProviderKind::Gemini => {
                LlmProvider::Gemini(gemini::GeminiClient::new(config.api_key, config.base_url, config.timeouts)?)
            }
            LlmProviderKind::OpenAi => {
                LlmProvider::OpenAi(openai::OpenAiClient::new(config.api_key, config.base_url, config.timeouts)?)
            }
        };
        Ok(Self { inner, provider: config.provider, text_model: config.text_model, image_model: config.image_model })
    }

    #[must_use]
    pub fn provider(&self) -> LlmProviderKind {
        self.provider
    }

    #[must_use]
    pub fn text_model(&self) -> &str {
        &self.text_model
    }

    #[must_use]
    pub fn image_model(&self) -> &str {
        &self.image_model
    }
}

#[async_trait::async_trait]
impl LlmGenerate for LlmClient {
    async fn generate_json(&self, prompt: &str, schema: &ResponseSchema) -> Result<String, LlmError> {
        match &self.inner {
            LlmProvider::Gemini(c) => c.generate_json(&self.text_model, prompt, schema).await,
            LlmProvider::OpenAi(c) => c.generate_json(&self.text_model, prompt, schema).await,
        }
    }

    async fn generate_image(&self, prompt: &str, aspect_ratio: &str) -> Result<Option<InlineImage>, LlmError> {
        match &self.inner {
            LlmProvider::Gemini(c) => {
                c.generate_image(&self.image_model, prompt, aspect_ratio)
                    .await
            }
            LlmProvider::OpenAi(c) => {
                c.generate_image(&self.image_model, prompt, aspect_ratio)
                    .await
            }
        }
    }
}
