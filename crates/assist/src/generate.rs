//! Streaming generation of the final website prompt.

use futures::stream::{self, BoxStream, Stream, StreamExt};
use sitebrief_core::AppResult;
use sitebrief_llm::{LlmClient, LlmRequest};
use sitebrief_prompt::stream::snapshots;
use sitebrief_prompt::{assemble, FormState, Snapshot};

/// Assemble the brief and open a text stream for it.
///
/// A failure to open the stream is delivered as the only item, so callers see
/// it the same way as a failure mid-stream. Empty fragments are skipped.
pub async fn website_prompt_fragments(
    client: &dyn LlmClient,
    model: &str,
    form: &FormState,
) -> BoxStream<'static, AppResult<String>> {
    let request = LlmRequest::new(assemble(form), model).with_streaming();
    tracing::info!(
        "Streaming website prompt for '{}' ({} bytes of brief)",
        form.project_name,
        request.prompt.len()
    );

    match client.stream(&request).await {
        Ok(chunks) => chunks
            .filter_map(|chunk| async move {
                match chunk {
                    Ok(chunk) if chunk.content.is_empty() => None,
                    Ok(chunk) => Some(Ok(chunk.content)),
                    Err(e) => Some(Err(e)),
                }
            })
            .boxed(),
        Err(e) => {
            tracing::error!("Could not open stream: {}", e);
            stream::once(async move { Err(e) }).boxed()
        }
    }
}

/// Stream snapshots of the polished website prompt.
pub async fn stream_website_prompt(
    client: &dyn LlmClient,
    model: &str,
    form: &FormState,
) -> impl Stream<Item = Snapshot> + Send {
    snapshots(website_prompt_fragments(client, model, form).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitebrief_llm::MockClient;
    use sitebrief_prompt::stream::drive;
    use sitebrief_prompt::{StreamOutcome, StreamState};

    #[tokio::test]
    async fn test_stream_sends_assembled_prompt() {
        let client = MockClient::new().with_fragments(["# Prompt", "", "\nCorpo"]);
        let form = FormState {
            project_name: "Café Aurora".to_string(),
            ..FormState::default()
        };

        let seen: Vec<Snapshot> = stream_website_prompt(&client, "mock", &form)
            .await
            .collect()
            .await;
        let texts: Vec<&str> = seen.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["# Prompt", "# Prompt\nCorpo"]);

        let request = &client.requests()[0];
        assert!(request.stream);
        assert_eq!(request.prompt, assemble(&form));
    }

    #[tokio::test]
    async fn test_mid_stream_failure_becomes_diagnostic() {
        let client = MockClient::new().with_failing_stream(["Parte1"], "conexão perdida");

        let fragments = website_prompt_fragments(&client, "mock", &FormState::default()).await;
        let outcome = drive(fragments, |_| {}).await;

        assert!(outcome.is_failed());
        assert!(outcome.text().starts_with("Parte1\n"));
        assert!(outcome.text().contains("conexão perdida"));
    }

    #[tokio::test]
    async fn test_open_failure_is_terminal_snapshot() {
        let client = MockClient::new().with_error("401 Unauthorized");

        let seen: Vec<Snapshot> = stream_website_prompt(&client, "mock", &FormState::default())
            .await
            .collect()
            .await;
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].state, StreamState::Failed);
        assert!(seen[0]
            .text
            .starts_with("Ocorreu um erro na comunicação com a API:"));
        assert!(seen[0].text.contains("401 Unauthorized"));
    }

    #[tokio::test]
    async fn test_echo_stream_reproduces_brief() {
        let client = MockClient::new();
        let form = FormState::default();

        let fragments = website_prompt_fragments(&client, "mock", &form).await;
        let outcome = drive(fragments, |_| {}).await;
        assert_eq!(outcome, StreamOutcome::Completed(assemble(&form)));
    }
}
