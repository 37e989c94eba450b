//! In-process mock provider.

use crate::client::{
    LlmClient, LlmImage, LlmRequest, LlmResponse, LlmStream, LlmStreamChunk, LlmUsage,
};
use sitebrief_core::{AppError, AppResult};
use std::collections::VecDeque;
use std::sync::Mutex;

/// One scripted reply, consumed by the next call of any kind.
#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Fragments {
        fragments: Vec<String>,
        failure: Option<String>,
    },
    Error(String),
    Image(LlmImage),
}

/// Mock provider for tests and offline runs.
///
/// Replies are scripted up front and consumed in order. Once the script is
/// exhausted the client echoes the prompt back: `complete` returns it whole and
/// `stream` returns it word by word, so the CLI works without network access.
/// Every request is recorded for inspection.
#[derive(Debug, Default)]
pub struct MockClient {
    replies: Mutex<VecDeque<MockReply>>,
    requests: Mutex<Vec<LlmRequest>>,
}

impl MockClient {
    /// Create an echoing mock with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a text reply (streamed as a single fragment).
    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.script(MockReply::Text(text.into()))
    }

    /// Script a streamed reply delivered as these fragments.
    pub fn with_fragments<I, S>(self, fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.script(MockReply::Fragments {
            fragments: fragments.into_iter().map(Into::into).collect(),
            failure: None,
        })
    }

    /// Script a stream that yields `fragments` and then fails mid-stream.
    pub fn with_failing_stream<I, S>(self, fragments: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.script(MockReply::Fragments {
            fragments: fragments.into_iter().map(Into::into).collect(),
            failure: Some(message.into()),
        })
    }

    /// Script an upstream failure for the next call.
    pub fn with_error(self, message: impl Into<String>) -> Self {
        self.script(MockReply::Error(message.into()))
    }

    /// Script an image reply.
    pub fn with_image(self, mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        self.script(MockReply::Image(LlmImage {
            mime_type: mime_type.into(),
            data,
        }))
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<LlmRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn script(self, reply: MockReply) -> Self {
        self.replies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(reply);
        self
    }

    fn next_reply(&self, request: &LlmRequest) -> Option<MockReply> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request.clone());
        self.replies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
    }

    fn chunk(content: String, model: &str, done: bool) -> AppResult<LlmStreamChunk> {
        Ok(LlmStreamChunk {
            content,
            model: model.to_string(),
            done,
            usage: done.then(LlmUsage::default),
        })
    }
}

#[async_trait::async_trait]
impl LlmClient for MockClient {
    fn provider_name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
        let content = match self.next_reply(request) {
            Some(MockReply::Text(text)) => text,
            Some(MockReply::Fragments { fragments, .. }) => fragments.concat(),
            Some(MockReply::Error(message)) => return Err(AppError::Llm(message)),
            Some(MockReply::Image(_)) => {
                return Err(AppError::MalformedResponse(
                    "Scripted image reply used for a text completion".to_string(),
                ))
            }
            None => request.prompt.clone(),
        };

        tracing::debug!("Mock completion of {} bytes", content.len());

        Ok(LlmResponse {
            content,
            model: request.model.clone(),
            usage: LlmUsage::default(),
            done: true,
        })
    }

    async fn stream(&self, request: &LlmRequest) -> AppResult<LlmStream> {
        let (fragments, failure) = match self.next_reply(request) {
            Some(MockReply::Text(text)) => (vec![text], None),
            Some(MockReply::Fragments { fragments, failure }) => (fragments, failure),
            Some(MockReply::Error(message)) => return Err(AppError::Llm(message)),
            Some(MockReply::Image(_)) => {
                return Err(AppError::MalformedResponse(
                    "Scripted image reply used for a stream".to_string(),
                ))
            }
            None => (
                request
                    .prompt
                    .split_inclusive(' ')
                    .map(str::to_string)
                    .collect(),
                None,
            ),
        };

        let last = fragments.len().saturating_sub(1);
        let clean_end = failure.is_none();
        let mut items: Vec<AppResult<LlmStreamChunk>> = fragments
            .into_iter()
            .enumerate()
            .map(|(i, f)| Self::chunk(f, &request.model, clean_end && i == last))
            .collect();

        if let Some(message) = failure {
            items.push(Err(AppError::Llm(message)));
        }

        Ok(Box::pin(futures::stream::iter(items)))
    }

    async fn generate_image(&self, request: &LlmRequest) -> AppResult<LlmImage> {
        match self.next_reply(request) {
            Some(MockReply::Image(image)) => Ok(image),
            Some(MockReply::Error(message)) => Err(AppError::Llm(message)),
            _ => Err(AppError::MalformedResponse(
                "No image was returned by the API".to_string(),
            )),
        }
    }
}
