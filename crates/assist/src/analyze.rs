//! Website analysis: fetch a page, reduce it to text, and extract a brief.

use crate::context;
use regex::Regex;
use serde_json::{json, Value};
use sitebrief_core::{AppError, AppResult};
use sitebrief_llm::{complete_json, LlmClient, LlmRequest};
use sitebrief_prompt::templates::analysis_prompt;
use sitebrief_prompt::SiteAnalysis;
use std::sync::LazyLock;

static HIDDEN_BLOCKS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)<head\b.*?</head\s*>|<script\b.*?</script\s*>|<style\b.*?</style\s*>|<noscript\b.*?</noscript\s*>|<template\b.*?</template\s*>|<!--.*?-->",
    )
    .expect("Invalid hidden block regex")
});

static TAGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("Invalid tag regex"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Visible text of an HTML document, entities decoded and whitespace collapsed.
pub fn html_to_text(html: &str) -> String {
    let visible = HIDDEN_BLOCKS.replace_all(html, " ");
    let stripped = TAGS.replace_all(&visible, " ");
    let decoded = html_escape::decode_html_entities(&stripped);
    WHITESPACE.replace_all(&decoded, " ").trim().to_string()
}

/// JSON schema of [`SiteAnalysis`].
pub fn analysis_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "projectName": { "type": "string", "description": "O nome do negócio ou projeto." },
            "niche": { "type": "string", "description": "O nicho de mercado do site." },
            "targetAudience": { "type": "string", "description": "O público-alvo provável do site." },
            "mainGoal": { "type": "string", "description": "A principal chamada para ação (CTA) ou objetivo do site." },
            "tone": { "type": "string", "description": "O tom de voz (ex: Profissional, Amigável)." },
            "selectedPages": {
                "type": "array",
                "items": { "type": "string" },
                "description": "Uma lista de páginas que o site provavelmente tem (ex: Início, Sobre, Contato)."
            },
            "colors": {
                "type": "object",
                "properties": {
                    "primary": { "type": "string", "description": "A cor primária principal (hex)." },
                    "accent": { "type": "string", "description": "A cor de destaque/acento (hex)." }
                }
            }
        },
        "required": ["projectName", "niche", "targetAudience", "mainGoal", "tone", "selectedPages", "colors"]
    })
}

/// Extract a brief from website text.
pub async fn analyze_website_content(
    client: &dyn LlmClient,
    model: &str,
    text: &str,
) -> AppResult<SiteAnalysis> {
    let request = LlmRequest::new(analysis_prompt(text)?, model)
        .with_response_schema(analysis_schema());

    complete_json(client, &request)
        .await
        .map_err(context("The AI could not analyze the website content"))
}

/// Fetch `url` and analyze its visible text.
pub async fn analyze_url(
    client: &dyn LlmClient,
    http: &reqwest::Client,
    model: &str,
    url: &str,
) -> AppResult<SiteAnalysis> {
    tracing::info!("Fetching {} for analysis", url);

    let response = http
        .get(url)
        .send()
        .await
        .map_err(|e| AppError::Llm(format!("Could not fetch the URL: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(AppError::Llm(format!(
            "Could not fetch the URL. Status: {}",
            status.as_u16()
        )));
    }

    let html = response
        .text()
        .await
        .map_err(|e| AppError::Llm(format!("Could not read the page body: {}", e)))?;

    let text = html_to_text(&html);
    if text.is_empty() {
        return Err(AppError::Prompt(
            "The website returned no text content to analyze".to_string(),
        ));
    }

    tracing::debug!("Extracted {} characters of text from {}", text.len(), url);
    analyze_website_content(client, model, &text).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitebrief_llm::MockClient;

    #[test]
    fn test_html_to_text() {
        let html = r#"<!DOCTYPE html>
<html>
  <head><title>Ignored</title><style>body { color: red; }</style></head>
  <body>
    <!-- nav -->
    <h1>Padaria&nbsp;Sol</h1>
    <script>var x = "<p>hidden</p>";</script>
    <p>P&atilde;o &amp; caf&#233; &lt;fresco&gt; &#x2764;</p>
    <p>Promo&ccedil;&otilde;es &Agrave; vista &ndash; S&atilde;o Jo&atilde;o&hellip;</p>
  </body>
</html>"#;

        assert_eq!(
            html_to_text(html),
            "Padaria Sol Pão & café <fresco> \u{2764} Promoções À vista \u{2013} São João\u{2026}"
        );
    }

    #[test]
    fn test_html_to_text_keeps_unknown_entities() {
        assert_eq!(html_to_text("<p>A &bogus; B</p>"), "A &bogus; B");
    }

    #[test]
    fn test_html_to_text_empty_body() {
        assert_eq!(html_to_text("<html><body>  <div></div> </body></html>"), "");
    }

    #[tokio::test]
    async fn test_analyze_website_content() {
        let client = MockClient::new().with_response(
            r##"{"projectName":"Padaria Sol","niche":"Panificação","targetAudience":"Bairro","mainGoal":"Encomendar","tone":"Amigável","selectedPages":["Início","Contato"],"colors":{"primary":"#AA5500","accent":"#00AA55"}}"##,
        );

        let analysis = analyze_website_content(&client, "mock", "Pão quentinho todo dia")
            .await
            .unwrap();
        assert_eq!(analysis.project_name, "Padaria Sol");
        assert_eq!(analysis.selected_pages, vec!["Início", "Contato"]);

        let request = &client.requests()[0];
        assert!(request.prompt.contains("Pão quentinho todo dia"));
        assert!(request.response_schema.is_some());
    }

    #[tokio::test]
    async fn test_analysis_malformed_json() {
        let client = MockClient::new().with_response("não é JSON");
        let err = analyze_website_content(&client, "mock", "texto")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::MalformedResponse(_)));
        assert!(err.to_string().contains("could not analyze"));
    }

    #[tokio::test]
    async fn test_analyze_url_unreachable() {
        let client = MockClient::new();
        let http = reqwest::Client::new();

        let err = analyze_url(&client, &http, "mock", "not a url")
            .await
            .unwrap_err();
        assert!(err.is_upstream());
        assert!(client.requests().is_empty());
    }
}
