//! Suggestions for free-text form fields.

use crate::context;
use serde::Deserialize;
use serde_json::json;
use sitebrief_core::AppResult;
use sitebrief_llm::{complete_json, LlmClient, LlmRequest};
use sitebrief_prompt::templates::inspiration_prompt;
use sitebrief_prompt::InspirableField;

/// Number of suggestions requested per call.
pub const SUGGESTION_COUNT: usize = 3;

#[derive(Deserialize)]
struct Suggestions {
    suggestions: Vec<String>,
}

/// Ask for short suggestions for `field`, given a line of brief context.
pub async fn generate_inspiration(
    client: &dyn LlmClient,
    model: &str,
    field: InspirableField,
    context_line: &str,
) -> AppResult<Vec<String>> {
    let schema = json!({
        "type": "object",
        "properties": {
            "suggestions": { "type": "array", "items": { "type": "string" } }
        },
        "required": ["suggestions"]
    });
    let prompt = inspiration_prompt(field.as_str(), context_line, SUGGESTION_COUNT)?;
    let request = LlmRequest::new(prompt, model).with_response_schema(schema);

    let parsed: Suggestions = complete_json(client, &request)
        .await
        .map_err(context("Could not generate suggestions"))?;

    tracing::debug!("{} suggestions for {}", parsed.suggestions.len(), field);
    Ok(parsed.suggestions)
}
