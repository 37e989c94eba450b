//! SEO keyword generation.

use crate::context;
use serde::Deserialize;
use serde_json::json;
use sitebrief_core::AppResult;
use sitebrief_llm::{complete_json, LlmClient, LlmRequest};
use sitebrief_prompt::templates::keywords_prompt;

/// Number of keywords requested per call.
pub const KEYWORD_COUNT: usize = 10;

#[derive(Deserialize)]
struct Keywords {
    keywords: Vec<String>,
}

pub async fn generate_seo_keywords(
    client: &dyn LlmClient,
    model: &str,
    niche: &str,
    target_audience: &str,
) -> AppResult<Vec<String>> {
    let schema = json!({
        "type": "object",
        "properties": {
            "keywords": {
                "type": "array",
                "items": { "type": "string" },
                "description": format!("Uma lista de {} palavras-chave de SEO.", KEYWORD_COUNT)
            }
        },
        "required": ["keywords"]
    });
    let request = LlmRequest::new(keywords_prompt(niche, target_audience, KEYWORD_COUNT)?, model)
        .with_response_schema(schema);

    let parsed: Keywords = complete_json(client, &request)
        .await
        .map_err(context("Could not generate SEO keywords"))?;
    Ok(parsed.keywords)
}
