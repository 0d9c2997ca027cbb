//! OpenAI-compatible API client.
//!
//! Text refinement goes through `/chat/completions` with a strict
//! `json_schema` response format; images go through `/images/generations`
//! with `b64_json` output so the payload can be embedded as a data URL.

use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use super::config::LlmTimeouts;
use super::types::{InlineImage, LlmError, ResponseSchema};

const IMAGE_MIME: &str = "image/png";

pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(api_key: String, base_url: String, timeouts: LlmTimeouts) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key, base_url })
    }

    pub async fn generate_json(&self, model: &str, prompt: &str, schema: &ResponseSchema) -> Result<String, LlmError> {
        let body = CcRequest {
            model,
            messages: &[CcMessage { role: "user", content: prompt }],
            response_format: CcResponseFormat {
                format_type: "json_schema",
                json_schema: CcJsonSchema { name: &schema.name, strict: true, schema: &schema.schema },
            },
        };
        let text = self.send_json("/chat/completions", &body).await?;
        parse_chat_completions_text(&text)
    }

    pub async fn generate_image(
        &self,
        model: &str,
        prompt: &str,
        aspect_ratio: &str,
    ) -> Result<Option<InlineImage>, LlmError> {
        let body = ImageRequest { model, prompt, n: 1, size: size_for_aspect_ratio(aspect_ratio), response_format: "b64_json" };
        let text = self.send_json("/images/generations", &body).await?;
        parse_image_generation_response(&text)
    }

    async fn send_json(&self, path: &str, body: &impl Serialize) -> Result<String, LlmError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;
        if status != 200 {
            return Err(LlmError::ApiResponse { status, body: text });
        }
        Ok(text)
    }
}

/// Map a requested aspect ratio onto the nearest size the images API accepts.
fn size_for_aspect_ratio(aspect_ratio: &str) -> &'static str {
    match aspect_ratio {
        "16:9" | "4:3" | "3:2" => "1792x1024",
        "9:16" | "3:4" | "2:3" => "1024x1792",
        _ => "1024x1024",
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
struct CcRequest<'a> {
    model: &'a str,
    messages: &'a [CcMessage<'a>],
    response_format: CcResponseFormat<'a>,
}

#[derive(Serialize)]
struct CcMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct CcResponseFormat<'a> {
    #[serde(rename = "type")]
    format_type: &'static str,
    json_schema: CcJsonSchema<'a>,
}

#[derive(Serialize)]
struct CcJsonSchema<'a> {
    name: &'a str,
    strict: bool,
    schema: &'a Value,
}

#[derive(Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u32,
    size: &'static str,
    response_format: &'static str,
}

// =============================================================================
// RESPONSE PARSING
// =============================================================================

pub(crate) fn parse_chat_completions_text(json_text: &str) -> Result<String, LlmError> {
    let root: Value = serde_json::from_str(json_text).map_err(|e| LlmError::ApiParse(e.to_string()))?;
    let Some(message) = root
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|arr| arr.first())
        .and_then(|choice| choice.get("message"))
    else {
        return Err(LlmError::ApiParse("chat_completions: missing choices[0].message".to_string()));
    };

    if let Some(refusal) = message.get("refusal").and_then(Value::as_str) {
        return Err(LlmError::ApiParse(format!("chat_completions: model refused: {refusal}")));
    }

    Ok(message
        .get("content")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string())
}

pub(crate) fn parse_image_generation_response(json_text: &str) -> Result<Option<InlineImage>, LlmError> {
    let root: Value = serde_json::from_str(json_text).map_err(|e| LlmError::ApiParse(e.to_string()))?;
    let image = root
        .get("data")
        .and_then(Value::as_array)
        .and_then(|items| {
            items
                .iter()
                .find_map(|item| item.get("b64_json").and_then(Value::as_str))
        })
        .map(|data| InlineImage { mime_type: IMAGE_MIME.to_string(), data: data.to_string() });
    Ok(image)
}

#[cfg(test)]
#[path = "openai_test.rs"]
mod tests;
