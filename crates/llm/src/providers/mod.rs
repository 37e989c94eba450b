//! LLM provider implementations.

pub mod gemini;
pub mod mock;
pub mod ollama;

pub use gemini::GeminiClient;
pub use mock::MockClient;
pub use ollama::OllamaClient;

use futures::{Stream, StreamExt};
use sitebrief_core::{AppError, AppResult};
use std::collections::VecDeque;

/// Map a non-success HTTP response to an upstream error carrying the body.
pub(crate) async fn error_for_status(
    provider: &str,
    response: reqwest::Response,
) -> AppResult<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    Err(AppError::Llm(format!(
        "{} API error ({}): {}",
        provider, status, error_text
    )))
}

/// Accumulates raw network chunks and hands out complete lines.
///
/// Chunk boundaries fall anywhere, including inside a JSON object or a
/// multi-byte character, so bytes are held until a newline arrives.
#[derive(Debug, Default)]
pub(crate) struct LineBuffer {
    pending: Vec<u8>,
}

impl LineBuffer {
    /// Feed a chunk; returns every non-blank line completed by it.
    pub(crate) fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(chunk);

        let mut lines = Vec::new();
        while let Some(pos) = self.pending.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            let text = String::from_utf8_lossy(&line);
            let text = text.trim_end_matches(['\n', '\r']);
            if !text.trim().is_empty() {
                lines.push(text.to_string());
            }
        }
        lines
    }

    /// Flush a trailing line that never got its newline.
    pub(crate) fn finish(&mut self) -> Option<String> {
        let rest = std::mem::take(&mut self.pending);
        let text = String::from_utf8_lossy(&rest).trim().to_string();
        (!text.is_empty()).then_some(text)
    }
}

/// Turn a byte stream into a stream of complete lines.
///
/// The first transport error is forwarded and ends the stream.
pub(crate) fn lines<S, B>(bytes: S) -> impl Stream<Item = AppResult<String>> + Send
where
    S: Stream<Item = AppResult<B>> + Send + 'static,
    B: AsRef<[u8]> + Send,
{
    let state = (Box::pin(bytes), LineBuffer::default(), VecDeque::new(), false);

    futures::stream::unfold(state, |(mut bytes, mut buffer, mut ready, mut ended)| async move {
        loop {
            if let Some(line) = ready.pop_front() {
                return Some((Ok(line), (bytes, buffer, ready, ended)));
            }
            if ended {
                return None;
            }
            match bytes.next().await {
                Some(Ok(chunk)) => ready.extend(buffer.push(chunk.as_ref())),
                Some(Err(e)) => {
                    ended = true;
                    return Some((Err(e), (bytes, buffer, ready, ended)));
                }
                None => {
                    ended = true;
                    ready.extend(buffer.finish());
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_buffer_splits_across_chunks() {
        let mut buffer = LineBuffer::default();
        assert!(buffer.push(b"{\"response\":\"Ol").is_empty());
        assert_eq!(buffer.push(b"a\"}\n{\"resp"), vec!["{\"response\":\"Ola\"}"]);
        assert_eq!(buffer.push(b"onse\":\"!\"}\r\n\n"), vec!["{\"response\":\"!\"}"]);
        assert_eq!(buffer.finish(), None);
    }

    #[test]
    fn test_line_buffer_keeps_split_utf8_intact() {
        let text = "data: Início\n".as_bytes();
        // Split inside the two-byte 'í'
        let split = text.iter().position(|b| *b == 0xC3).unwrap() + 1;

        let mut buffer = LineBuffer::default();
        assert!(buffer.push(&text[..split]).is_empty());
        assert_eq!(buffer.push(&text[split..]), vec!["data: Início"]);
    }

    #[test]
    fn test_line_buffer_finish_returns_remainder() {
        let mut buffer = LineBuffer::default();
        buffer.push(b"tail without newline");
        assert_eq!(buffer.finish().as_deref(), Some("tail without newline"));
        assert_eq!(buffer.finish(), None);
    }

    #[tokio::test]
    async fn test_lines_stream_stops_after_error() {
        let chunks: Vec<AppResult<Vec<u8>>> = vec![
            Ok(b"one\ntw".to_vec()),
            Err(AppError::Llm("reset".to_string())),
            Ok(b"o\n".to_vec()),
        ];
        let collected: Vec<AppResult<String>> =
            lines(futures::stream::iter(chunks)).collect().await;

        assert_eq!(collected.len(), 2);
        assert_eq!(collected[0].as_ref().unwrap(), "one");
        assert!(collected[1].is_err());
    }
}
