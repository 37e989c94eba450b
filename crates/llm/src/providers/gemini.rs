//! Google Gemini LLM provider implementation.
//!
//! Uses the Generative Language REST API:
//! - `models/{model}:generateContent` for completions, structured output and images
//! - `models/{model}:streamGenerateContent?alt=sse` for streaming

use super::{error_for_status, lines};
use crate::client::{
    LlmClient, LlmImage, LlmRequest, LlmResponse, LlmStream, LlmStreamChunk, LlmUsage,
};
use base64::Engine;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use sitebrief_core::{AppError, AppResult};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Gemini API request format.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

impl GeminiContent {
    fn text(role: Option<&str>, text: &str) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![GeminiPart {
                text: Some(text.to_string()),
                inline_data: None,
            }],
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_modalities: Option<Vec<String>>,
}

/// Gemini API response format (also one SSE event when streaming).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
    #[serde(default)]
    model_version: Option<String>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
    #[serde(default)]
    error: Option<GeminiError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<GeminiContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

/// Error object the API sends in place of a response, also mid-stream.
#[derive(Debug, Deserialize)]
struct GeminiError {
    #[serde(default)]
    code: Option<u16>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

impl GeminiError {
    fn into_app_error(self) -> AppError {
        let message = self
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| "Unknown error".to_string());
        let status = match (self.code, self.status) {
            (Some(code), Some(status)) => format!(" ({} {})", code, status),
            (Some(code), None) => format!(" ({})", code),
            (None, Some(status)) => format!(" ({})", status),
            (None, None) => String::new(),
        };
        AppError::Llm(format!("Gemini API error{}: {}", status, message))
    }
}

impl GeminiResponse {
    fn block_reason(&self) -> Option<&str> {
        self.prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
    }

    /// Surface an inline error object or a blocked prompt as an error.
    fn check(mut self) -> AppResult<Self> {
        if let Some(error) = self.error.take() {
            return Err(error.into_app_error());
        }
        if self.candidates.is_empty() {
            if let Some(reason) = self.block_reason() {
                return Err(AppError::MalformedResponse(format!(
                    "Gemini blocked the prompt ({})",
                    reason
                )));
            }
        }
        Ok(self)
    }

    fn parts(&self) -> impl Iterator<Item = &GeminiPart> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .into_iter()
            .flat_map(|content| content.parts.iter())
    }

    /// Concatenated text of the first candidate.
    fn text(&self) -> String {
        self.parts().filter_map(|p| p.text.as_deref()).collect()
    }

    fn finished(&self) -> bool {
        self.candidates
            .first()
            .is_some_and(|c| c.finish_reason.is_some())
    }

    fn usage(&self) -> LlmUsage {
        self.usage_metadata
            .as_ref()
            .map(|u| LlmUsage::new(u.prompt_token_count, u.candidates_token_count))
            .unwrap_or_default()
    }

    /// Reject responses that carry no candidate at all.
    fn ensure_candidates(self) -> AppResult<Self> {
        let response = self.check()?;
        if response.candidates.is_empty() {
            return Err(AppError::MalformedResponse(
                "Gemini returned no content (no candidates)".to_string(),
            ));
        }
        Ok(response)
    }
}

/// Gemini LLM client.
pub struct GeminiClient {
    /// Base URL for the Generative Language API
    base_url: String,

    /// API key sent as `x-goog-api-key`
    api_key: String,

    /// HTTP client
    client: reqwest::Client,
}

impl GeminiClient {
    /// Create a new Gemini client against the public endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, api_key)
    }

    /// Create a new Gemini client with a custom base URL.
    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Apply a request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> AppResult<Self> {
        self.client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(self)
    }

    fn endpoint(&self, model: &str, method: &str) -> String {
        format!("{}/v1beta/models/{}:{}", self.base_url, model, method)
    }

    /// Convert LlmRequest to Gemini format.
    fn to_gemini_request(&self, request: &LlmRequest) -> GeminiRequest {
        let mut config = GenerationConfig {
            temperature: request.temperature,
            top_p: request.top_p,
            max_output_tokens: request.max_tokens,
            ..Default::default()
        };

        if let Some(ref schema) = request.response_schema {
            config.response_mime_type = Some("application/json".to_string());
            config.response_schema = Some(to_gemini_schema(schema));
        }

        GeminiRequest {
            contents: vec![GeminiContent::text(Some("user"), &request.prompt)],
            system_instruction: request
                .system
                .as_deref()
                .map(|s| GeminiContent::text(None, s)),
            generation_config: (config != GenerationConfig::default()).then_some(config),
        }
    }

    async fn post(&self, url: &str, body: &GeminiRequest) -> AppResult<reqwest::Response> {
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::Llm(format!("Failed to send request to Gemini: {}", e)))?;

        error_for_status("Gemini", response).await
    }

    async fn generate(&self, body: &GeminiRequest, model: &str) -> AppResult<GeminiResponse> {
        let url = self.endpoint(model, "generateContent");
        let response = self.post(&url, body).await?;

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            AppError::MalformedResponse(format!("Failed to parse Gemini response: {}", e))
        })?;

        gemini_response.ensure_candidates()
    }

    /// Parse one SSE line; non-data lines yield `None`.
    ///
    /// Error objects and blocked prompts become errors so the stream ends in
    /// failure instead of completing with no text.
    fn parse_event(line: &str, model: &str) -> Option<AppResult<LlmStreamChunk>> {
        let payload = line.strip_prefix("data:")?.trim();

        let parsed = serde_json::from_str::<GeminiResponse>(payload)
            .map_err(|e| AppError::MalformedResponse(format!("Failed to parse chunk: {}", e)))
            .and_then(GeminiResponse::check)
            .map(|event| {
                let done = event.finished();
                LlmStreamChunk {
                    content: event.text(),
                    model: event.model_version.clone().unwrap_or_else(|| model.to_string()),
                    done,
                    usage: done.then(|| event.usage()),
                }
            });
        Some(parsed)
    }

    /// Turn an SSE byte stream into stream chunks.
    fn sse_chunks<S, B>(bytes: S, model: String) -> LlmStream
    where
        S: futures::Stream<Item = AppResult<B>> + Send + 'static,
        B: AsRef<[u8]> + Send + 'static,
    {
        let stream = lines(bytes).filter_map(move |line| {
            let chunk = match line {
                Ok(line) => Self::parse_event(&line, &model),
                Err(e) => Some(Err(e)),
            };
            futures::future::ready(chunk)
        });
        Box::pin(stream)
    }
}

/// Convert a JSON Schema into Gemini's schema dialect (uppercase type names).
fn to_gemini_schema(schema: &serde_json::Value) -> serde_json::Value {
    use serde_json::Value;

    match schema {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, value)| {
                    let converted = match (key.as_str(), value) {
                        ("type", Value::String(t)) => Value::String(t.to_uppercase()),
                        _ => to_gemini_schema(value),
                    };
                    (key.clone(), converted)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(to_gemini_schema).collect()),
        other => other.clone(),
    }
}

#[async_trait::async_trait]
impl LlmClient for GeminiClient {
    fn provider_name(&self) -> &str {
        "gemini"
    }

    async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
        tracing::info!("Sending completion request to Gemini");
        tracing::debug!("Request: {:?}", request);

        let body = self.to_gemini_request(request);
        let response = self.generate(&body, &request.model).await?;

        tracing::info!("Received completion from Gemini");
        tracing::debug!("Response: {:?}", response);

        Ok(LlmResponse {
            content: response.text(),
            model: response
                .model_version
                .clone()
                .unwrap_or_else(|| request.model.clone()),
            usage: response.usage(),
            done: true,
        })
    }

    async fn stream(&self, request: &LlmRequest) -> AppResult<LlmStream> {
        tracing::info!("Starting streaming request to Gemini");
        tracing::debug!("Request: {:?}", request);

        let body = self.to_gemini_request(request);
        let url = format!("{}?alt=sse", self.endpoint(&request.model, "streamGenerateContent"));
        let response = self.post(&url, &body).await?;

        let bytes = response
            .bytes_stream()
            .map(|result| result.map_err(|e| AppError::Llm(format!("Stream error: {}", e))));

        Ok(Self::sse_chunks(bytes, request.model.clone()))
    }

    async fn generate_image(&self, request: &LlmRequest) -> AppResult<LlmImage> {
        tracing::info!("Sending image generation request to Gemini");

        let mut body = self.to_gemini_request(request);
        body.generation_config
            .get_or_insert_with(GenerationConfig::default)
            .response_modalities = Some(vec!["IMAGE".to_string()]);

        let response = self.generate(&body, &request.model).await?;

        let inline = response
            .parts()
            .find_map(|p| p.inline_data.as_ref())
            .ok_or_else(|| {
                AppError::MalformedResponse("No image was returned by the API".to_string())
            })?;

        let data = base64::engine::general_purpose::STANDARD
            .decode(inline.data.as_bytes())
            .map_err(|e| AppError::MalformedResponse(format!("Invalid image payload: {}", e)))?;

        tracing::info!("Received {} byte image ({})", data.len(), inline.mime_type);

        Ok(LlmImage {
            mime_type: inline.mime_type.clone(),
            data,
        })
    }
}
