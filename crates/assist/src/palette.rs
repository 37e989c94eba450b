//! Color palette generation.

use crate::context;
use serde_json::{json, Value};
use sitebrief_core::AppResult;
use sitebrief_llm::{complete_json, LlmClient, LlmRequest};
use sitebrief_prompt::templates::palette_prompt;
use sitebrief_prompt::Palette;

fn palette_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "primary": { "type": "string", "description": "A cor principal do site." },
            "secondary": { "type": "string", "description": "A cor secundária, para suporte." },
            "accent": { "type": "string", "description": "A cor de destaque para CTAs e links." },
            "neutral": { "type": "string", "description": "A cor neutra para fundos e textos." }
        },
        "required": ["primary", "secondary", "accent", "neutral"]
    })
}

/// Ask for a four-color palette matching the niche and visual style.
///
/// Every color is checked against the hex pattern; the first invalid one is
/// reported as a malformed response.
pub async fn generate_color_palette(
    client: &dyn LlmClient,
    model: &str,
    niche: &str,
    style: &str,
) -> AppResult<Palette> {
    let request =
        LlmRequest::new(palette_prompt(niche, style)?, model).with_response_schema(palette_schema());

    let palette: Palette = complete_json(client, &request)
        .await
        .map_err(context("Could not generate a color palette"))?;
    palette
        .validate()
        .map_err(context("Could not generate a color palette"))?;

    tracing::info!(
        "Generated palette {} {} {} {}",
        palette.primary,
        palette.secondary,
        palette.accent,
        palette.neutral
    );
    Ok(palette)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitebrief_core::AppError;
    use sitebrief_llm::MockClient;

    #[tokio::test]
    async fn test_generate_valid_palette() {
        let client = MockClient::new().with_response(
            "```json\n{\"primary\":\"#1A2B3C\",\"secondary\":\"#4D5E6F\",\"accent\":\"#FF6600\",\"neutral\":\"#FAFAFA\"}\n```",
        );

        let palette = generate_color_palette(&client, "mock", "Cafeteria", "Rústico e Orgânico")
            .await
            .unwrap();
        assert_eq!(palette.accent, "#FF6600");

        let request = &client.requests()[0];
        assert!(request.prompt.contains("\"Cafeteria\""));
        assert_eq!(
            request.response_schema.as_ref().unwrap()["required"][3],
            "neutral"
        );
    }

    #[tokio::test]
    async fn test_rejects_non_hex_color() {
        let client = MockClient::new().with_response(
            r##"{"primary":"blue","secondary":"#4D5E6F","accent":"#FF6600","neutral":"#FAFAFA"}"##,
        );

        let err = generate_color_palette(&client, "mock", "Cafeteria", "Moderno")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::MalformedResponse(_)));
        assert!(err.to_string().contains("\"blue\""));
    }

    #[tokio::test]
    async fn test_missing_color_is_malformed() {
        let client = MockClient::new().with_response(r##"{"primary":"#000000"}"##);
        let err = generate_color_palette(&client, "mock", "x", "y")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_upstream_failure() {
        let client = MockClient::new().with_error("503 Service Unavailable");
        let err = generate_color_palette(&client, "mock", "x", "y")
            .await
            .unwrap_err();
        assert!(err.is_upstream());
    }
}
