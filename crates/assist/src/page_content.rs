//! Draft copy for a single page.

use crate::context;
use sitebrief_core::{AppError, AppResult};
use sitebrief_llm::{LlmClient, LlmRequest};
use sitebrief_prompt::templates::page_content_prompt;
use sitebrief_prompt::FormState;

/// Ask for a 150-200 word draft for `page`, written for the brief in `form`.
pub async fn generate_page_content(
    client: &dyn LlmClient,
    model: &str,
    page: &str,
    form: &FormState,
) -> AppResult<String> {
    let what = format!("Could not generate content for {}", page);
    let request = LlmRequest::new(page_content_prompt(page, form)?, model);

    let response = client.complete(&request).await.map_err(context(&what))?;
    let text = response.content.trim();
    if text.is_empty() {
        return Err(AppError::MalformedResponse(format!(
            "{}: the model returned no text",
            what
        )));
    }

    tracing::debug!("Generated {} characters for {}", text.len(), page);
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitebrief_llm::MockClient;

    fn form() -> FormState {
        FormState {
            niche: "Yoga".to_string(),
            target_audience: "Iniciantes".to_string(),
            main_goal: "Agendar aula experimental".to_string(),
            ..FormState::default()
        }
    }

    #[tokio::test]
    async fn test_generate_page_content_trims() {
        let client = MockClient::new().with_response("\n## Sobre o estúdio\n\nTexto.\n\n");
        let text = generate_page_content(&client, "mock", "Sobre Nós", &form())
            .await
            .unwrap();
        assert_eq!(text, "## Sobre o estúdio\n\nTexto.");

        let request = &client.requests()[0];
        assert!(request.prompt.contains("página 'Sobre Nós'"));
        assert!(request.prompt.contains("'Agendar aula experimental'"));
        assert!(request.response_schema.is_none());
    }

    #[tokio::test]
    async fn test_blank_answer_is_malformed() {
        let client = MockClient::new().with_response("   ");
        let err = generate_page_content(&client, "mock", "Blog", &form())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::MalformedResponse(_)));
        assert!(err.to_string().contains("content for Blog"));
    }
}
