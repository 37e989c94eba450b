//! Structured (JSON) completions.

use crate::client::{LlmClient, LlmRequest};
use serde::de::DeserializeOwned;
use sitebrief_core::{AppError, AppResult};

/// Run a completion constrained to `request.response_schema` and parse the
/// answer into `T`.
///
/// Transport and status failures surface as `AppError::Llm`; a body that is
/// not valid JSON for `T` surfaces as `AppError::MalformedResponse`.
pub async fn complete_json<T: DeserializeOwned>(
    client: &dyn LlmClient,
    request: &LlmRequest,
) -> AppResult<T> {
    if request.response_schema.is_none() {
        tracing::warn!("Structured completion requested without a response schema");
    }

    let response = client.complete(request).await?;
    parse_json(&response.content)
}

/// Parse a model answer as JSON, tolerating surrounding whitespace and a
/// markdown code fence.
pub fn parse_json<T: DeserializeOwned>(raw: &str) -> AppResult<T> {
    let body = strip_code_fence(raw.trim());

    serde_json::from_str(body).map_err(|e| {
        tracing::debug!("Unparseable structured response: {}", raw);
        AppError::MalformedResponse(format!("Expected JSON from the model: {}", e))
    })
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };

    // Drop the info string ("json") on the opening fence line
    let rest = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };

    rest.strip_suffix("```").unwrap_or(rest).trim()
}
