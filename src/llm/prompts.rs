//! Prompt templates and the structured-output schema for layout refinement.

use super::types::ResponseSchema;

/// Number of content sections the refinement prompt asks for.
pub const SECTION_COUNT: usize = 3;

/// Aspect ratio requested for generated hero images.
pub const HERO_ASPECT_RATIO: &str = "16:9";

/// Build the schema the refinement response must conform to.
#[must_use]
pub fn layout_suggestion_schema() -> ResponseSchema {
    ResponseSchema {
        name: "layout_suggestion".into(),
        schema: serde_json::json!({
            "type": "object",
            "properties": {
                "refinedTitle": { "type": "string" },
                "refinedDescription": { "type": "string" },
                "suggestedTheme": { "type": "string", "description": "A HEX color code like #6366f1" },
                "sections": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "heading": { "type": "string" },
                            "body": { "type": "string" }
                        },
                        "required": ["heading", "body"],
                        "additionalProperties": false
                    }
                }
            },
            "required": ["refinedTitle", "refinedDescription", "suggestedTheme", "sections"],
            "additionalProperties": false
        }),
    }
}

/// Copywriting brief sent to the text model.
#[must_use]
pub fn refine_prompt(title: &str, description: &str) -> String {
    format!(
        "You are a professional copywriter and UI designer.\n\
         Analyze the following brief:\n\
         Title: \"{title}\"\n\
         Description: \"{description}\"\n\
         \n\
         Task:\n\
         1. Refine the title to be punchy and professional.\n\
         2. Expand the description into a compelling sub-header.\n\
         3. Generate {SECTION_COUNT} distinct content sections (heading and body text) that would fit a modern \
         landing page or presentation for this topic.\n\
         4. Suggest a vibrant primary HEX theme color."
    )
}

/// Editorial-photography prompt sent to the image model.
#[must_use]
pub fn image_prompt(context: &str, subject: Option<&str>) -> String {
    let subject = subject.map(str::trim).filter(|s| !s.is_empty()).unwrap_or("Background");
    format!(
        "High-end, professional, editorial photography for a web layout.\n\
         Subject: {subject}.\n\
         Context: {context}.\n\
         Style: Minimalist, cinematic lighting, shallow depth of field, high resolution 4k. No text, no logos."
    )
}

#[cfg(test)]
#[path = "prompts_test.rs"]
mod tests;
