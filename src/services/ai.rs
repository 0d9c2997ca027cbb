//! AI service: refine a layout brief into copy and sections, illustrate it with an image.
//!
//! DESIGN
//! ======
//! Two independent calls with deliberately different failure contracts.
//! `refine_content` is a required step: any transport, status or shape
//! failure propagates as [`AiError`]. `generate_image` is a best-effort
//! enhancement: failures are logged and collapse to `None`, so callers can
//! always carry on without an image.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{info, warn};

use crate::error::ErrorCode;
use crate::llm::LlmGenerate;
use crate::llm::prompts::{HERO_ASPECT_RATIO, image_prompt, layout_suggestion_schema, refine_prompt};
use crate::llm::types::LlmError;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("LLM not configured")]
    LlmNotConfigured,
    #[error("LLM error: {0}")]
    LlmError(#[from] LlmError),
    #[error("malformed AI response: {0}")]
    MalformedResponse(String),
}

impl ErrorCode for AiError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::LlmNotConfigured => "E_LLM_NOT_CONFIGURED",
            Self::LlmError(_) => "E_LLM_ERROR",
            Self::MalformedResponse(_) => "E_MALFORMED_RESPONSE",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::LlmError(e) if e.retryable()) || matches!(self, Self::MalformedResponse(_))
    }
}

/// Refined copy returned by the text model.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiSuggestion {
    pub refined_title: String,
    pub refined_description: String,
    /// May be blank if the model ignored the instruction; callers default it.
    #[serde(default)]
    pub suggested_theme: String,
    pub sections: Vec<SuggestedSection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SuggestedSection {
    pub heading: String,
    pub body: String,
}

// =============================================================================
// REFINE
// =============================================================================

/// Expand a title/description brief into refined copy, sections and a theme.
///
/// # Errors
///
/// Returns [`AiError::LlmNotConfigured`] without an LLM, [`AiError::LlmError`]
/// if the call fails, and [`AiError::MalformedResponse`] if the model's text
/// is not the expected shape.
pub async fn refine_content(
    llm: Option<&Arc<dyn LlmGenerate>>,
    title: &str,
    description: &str,
) -> Result<AiSuggestion, AiError> {
    let llm = llm.ok_or(AiError::LlmNotConfigured)?;
    info!(title_len = title.len(), description_len = description.len(), "ai: refine requested");

    let text = llm
        .generate_json(&refine_prompt(title, description), &layout_suggestion_schema())
        .await?;
    let suggestion = parse_suggestion(&text)?;

    info!(sections = suggestion.sections.len(), theme = %suggestion.suggested_theme, "ai: refine complete");
    Ok(suggestion)
}

fn parse_suggestion(text: &str) -> Result<AiSuggestion, AiError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AiError::MalformedResponse("empty response".into()));
    }
    serde_json::from_str(trimmed).map_err(|e| AiError::MalformedResponse(e.to_string()))
}

// =============================================================================
// IMAGE
// =============================================================================

/// Generate an editorial image for `context` and return it as a data URL.
///
/// Never fails: a missing client, a failed call, or a reply without an image
/// all yield `None`.
pub async fn generate_image(llm: Option<&Arc<dyn LlmGenerate>>, context: &str, title: Option<&str>) -> Option<String> {
    let Some(llm) = llm else {
        warn!("ai: image generation skipped, LLM not configured");
        return None;
    };

    match llm
        .generate_image(&image_prompt(context, title), HERO_ASPECT_RATIO)
        .await
    {
        Ok(Some(image)) => {
            info!(mime = %image.mime_type, bytes_b64 = image.data.len(), "ai: image generated");
            Some(image.to_data_url())
        }
        Ok(None) => {
            info!("ai: image response carried no image");
            None
        }
        Err(e) => {
            warn!(error = %e, "ai: image generation failed");
            None
        }
    }
}

#[cfg(test)]
#[path = "ai_test.rs"]
mod tests;
