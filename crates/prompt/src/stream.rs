//! Streaming aggregation of generated text.
//!
//! A source of text fragments is folded into one growing document. Every
//! fragment publishes a [`Snapshot`] holding the full text so far, so a
//! consumer can simply replace what it renders. A failing source ends the
//! session with one diagnostic line appended to whatever arrived before it.

use futures::stream::{self, AbortHandle, Abortable, Stream, StreamExt};
use std::fmt;
use std::pin::pin;

const DIAGNOSTIC_PREFIX: &str = "Ocorreu um erro na comunicação com a API:";
const DIAGNOSTIC_UNKNOWN: &str = "Ocorreu um erro desconhecido ao gerar o prompt.";

/// Human readable line describing a streaming failure.
pub fn diagnostic_line(message: &str) -> String {
    let message = message.trim();
    if message.is_empty() {
        DIAGNOSTIC_UNKNOWN.to_string()
    } else {
        format!("{} {}", DIAGNOSTIC_PREFIX, message)
    }
}

/// Lifecycle of a streaming session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    /// Nothing received yet; the empty document is a valid state
    Idle,
    Streaming,
    Completed,
    Failed,
}

impl StreamState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// The full document as of one published point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub text: String,
    pub state: StreamState,
}

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamOutcome {
    Completed(String),
    Failed { text: String, message: String },
}

impl StreamOutcome {
    /// Final document, including the diagnostic line on failure.
    pub fn text(&self) -> &str {
        match self {
            Self::Completed(text) | Self::Failed { text, .. } => text,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Accumulator for a single streaming call.
#[derive(Debug, Clone)]
pub struct StreamSession {
    text: String,
    state: StreamState,
    error: Option<String>,
}

impl Default for StreamSession {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamSession {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            state: StreamState::Idle,
            error: None,
        }
    }

    pub fn state(&self) -> StreamState {
        self.state
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Failure message, once the session has failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            text: self.text.clone(),
            state: self.state,
        }
    }

    /// Append a fragment. Returns `None` once the session is terminal.
    pub fn push(&mut self, fragment: &str) -> Option<Snapshot> {
        if self.state.is_terminal() {
            return None;
        }
        self.text.push_str(fragment);
        self.state = StreamState::Streaming;
        Some(self.snapshot())
    }

    /// Mark the source as exhausted.
    pub fn complete(&mut self) {
        if !self.state.is_terminal() {
            self.state = StreamState::Completed;
        }
    }

    /// End the session with a diagnostic line on its own line.
    pub fn fail(&mut self, message: &str) -> Option<Snapshot> {
        if self.state.is_terminal() {
            return None;
        }
        if !self.text.is_empty() && !self.text.ends_with('\n') {
            self.text.push('\n');
        }
        self.text.push_str(&diagnostic_line(message));
        self.error = Some(message.to_string());
        self.state = StreamState::Failed;
        Some(self.snapshot())
    }

    /// Close the session and report how it ended.
    pub fn finish(mut self) -> StreamOutcome {
        self.complete();
        match self.error {
            Some(message) => StreamOutcome::Failed {
                text: self.text,
                message,
            },
            None => StreamOutcome::Completed(self.text),
        }
    }
}

/// Fold `source` into snapshots, one per fragment.
///
/// Exhaustion ends the stream without a further item. An error yields a
/// final [`StreamState::Failed`] snapshot and ends the stream.
pub fn snapshots<S, E>(source: S) -> impl Stream<Item = Snapshot>
where
    S: Stream<Item = Result<String, E>>,
    E: fmt::Display,
{
    let initial = Some((Box::pin(source), StreamSession::new()));

    stream::unfold(initial, |state| async move {
        let Some((mut source, mut session)) = state else {
            return None;
        };
        match source.next().await {
            Some(Ok(fragment)) => session
                .push(&fragment)
                .map(|snapshot| (snapshot, Some((source, session)))),
            Some(Err(e)) => {
                tracing::warn!("Stream failed after {} bytes: {}", session.text().len(), e);
                session.fail(&e.to_string()).map(|snapshot| (snapshot, None))
            }
            None => {
                session.complete();
                tracing::debug!("Stream completed with {} bytes", session.text().len());
                None
            }
        }
    })
}

/// Like [`snapshots`], with a handle that stops publication when aborted.
pub fn abortable_snapshots<S, E>(
    source: S,
) -> (Abortable<impl Stream<Item = Snapshot>>, AbortHandle)
where
    S: Stream<Item = Result<String, E>>,
    E: fmt::Display,
{
    stream::abortable(snapshots(source))
}

/// Run a whole session, handing every snapshot to `on_snapshot`.
pub async fn drive<S, E, F>(source: S, mut on_snapshot: F) -> StreamOutcome
where
    S: Stream<Item = Result<String, E>>,
    E: fmt::Display,
    F: FnMut(&Snapshot),
{
    let mut source = pin!(source);
    let mut session = StreamSession::new();

    while let Some(item) = source.next().await {
        let published = match item {
            Ok(fragment) => session.push(&fragment),
            Err(e) => session.fail(&e.to_string()),
        };
        if let Some(snapshot) = published {
            on_snapshot(&snapshot);
        }
        if session.state().is_terminal() {
            break;
        }
    }

    session.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::mpsc;

    fn fragments(items: &[&str]) -> impl Stream<Item = Result<String, String>> {
        let owned: Vec<Result<String, String>> =
            items.iter().map(|s| Ok(s.to_string())).collect();
        stream::iter(owned)
    }

    #[tokio::test]
    async fn test_snapshots_accumulate() {
        let texts: Vec<String> = snapshots(fragments(&["Ola", ", ", "mundo"]))
            .map(|s| s.text)
            .collect()
            .await;
        assert_eq!(texts, vec!["Ola", "Ola, ", "Ola, mundo"]);
    }

    #[tokio::test]
    async fn test_zero_fragments_complete_empty() {
        let seen: Vec<Snapshot> = snapshots(fragments(&[])).collect().await;
        assert!(seen.is_empty());

        let mut calls = 0;
        let outcome = drive(fragments(&[]), |_| calls += 1).await;
        assert_eq!(calls, 0);
        assert_eq!(outcome, StreamOutcome::Completed(String::new()));
    }

    #[tokio::test]
    async fn test_failure_appends_diagnostic() {
        let source = stream::iter(vec![
            Ok("Parte1".to_string()),
            Err("quota excedida".to_string()),
            Ok("nunca".to_string()),
        ]);
        let seen: Vec<Snapshot> = snapshots(source).collect().await;

        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].text, "Parte1");
        assert_eq!(seen[0].state, StreamState::Streaming);
        assert_eq!(
            seen[1].text,
            "Parte1\nOcorreu um erro na comunicação com a API: quota excedida"
        );
        assert_eq!(seen[1].state, StreamState::Failed);
    }

    #[tokio::test]
    async fn test_drive_reports_failure() {
        let source = stream::iter(vec![Ok("Parte1".to_string()), Err("timeout".to_string())]);
        let mut published = Vec::new();
        let outcome = drive(source, |s| published.push(s.text.clone())).await;

        assert!(outcome.is_failed());
        assert_eq!(published.len(), 2);
        assert_eq!(outcome.text(), published[1]);
        match outcome {
            StreamOutcome::Failed { message, .. } => assert_eq!(message, "timeout"),
            other => panic!("Expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_failure_uses_generic_message() {
        assert_eq!(diagnostic_line("  "), DIAGNOSTIC_UNKNOWN);

        let mut session = StreamSession::new();
        let snapshot = session.fail("").unwrap();
        assert_eq!(snapshot.text, DIAGNOSTIC_UNKNOWN);
    }

    #[test]
    fn test_terminal_states_are_final() {
        let mut session = StreamSession::new();
        assert_eq!(session.state(), StreamState::Idle);
        assert_eq!(session.snapshot().text, "");

        session.push("abc\n");
        session.fail("boom");
        assert_eq!(session.text(), "abc\nOcorreu um erro na comunicação com a API: boom");
        assert!(session.push("more").is_none());
        assert!(session.fail("again").is_none());
        session.complete();
        assert_eq!(session.state(), StreamState::Failed);
        assert_eq!(session.error(), Some("boom"));
    }

    #[tokio::test]
    async fn test_abort_stops_publication() {
        let (tx, rx) = mpsc::unbounded::<Result<String, String>>();
        let (published, handle) = abortable_snapshots(rx);
        let mut published = pin!(published);

        tx.unbounded_send(Ok("primeiro".to_string())).unwrap();
        let first = published.next().await.unwrap();
        assert_eq!(first.text, "primeiro");

        handle.abort();
        tx.unbounded_send(Ok(" segundo".to_string())).unwrap();
        assert!(published.next().await.is_none());
        // Already published text stays valid
        assert_eq!(first.text, "primeiro");
    }

    #[tokio::test]
    async fn test_concurrent_sessions_are_independent() {
        let (a, b) = tokio::join!(
            drive(fragments(&["um", " dois"]), |_| {}),
            drive(fragments(&["três"]), |_| {}),
        );
        assert_eq!(a, StreamOutcome::Completed("um dois".to_string()));
        assert_eq!(b, StreamOutcome::Completed("três".to_string()));
    }
}
