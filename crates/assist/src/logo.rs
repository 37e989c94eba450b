//! Logo image generation.

use crate::context;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use sitebrief_core::AppResult;
use sitebrief_llm::{LlmClient, LlmImage, LlmRequest};
use sitebrief_prompt::templates::logo_prompt;
use sitebrief_prompt::FormState;

/// Generate a logo suggestion for the brief.
pub async fn generate_logo(
    client: &dyn LlmClient,
    model: &str,
    form: &FormState,
) -> AppResult<LlmImage> {
    let request = LlmRequest::new(logo_prompt(form)?, model);

    let image = client
        .generate_image(&request)
        .await
        .map_err(context("Could not generate a logo suggestion"))?;

    tracing::info!("Generated {} logo of {} bytes", image.mime_type, image.data.len());
    Ok(image)
}

/// Base64 form of a logo, as stored in `FormState::logo_suggestion`.
pub fn encode_logo(image: &LlmImage) -> String {
    STANDARD.encode(&image.data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitebrief_core::AppError;
    use sitebrief_llm::MockClient;

    #[tokio::test]
    async fn test_generate_logo() {
        let client = MockClient::new().with_image("image/png", vec![0x89, b'P', b'N', b'G']);
        let form = FormState {
            project_name: "Ateliê Lua".to_string(),
            ..FormState::default()
        };

        let image = generate_logo(&client, "mock-image", &form).await.unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(encode_logo(&image), "iVBORw==");

        let request = &client.requests()[0];
        assert_eq!(request.model, "mock-image");
        assert!(request.prompt.contains("preto e azul"));
    }

    #[tokio::test]
    async fn test_missing_image_is_malformed() {
        let client = MockClient::new().with_response("sem imagem");
        let err = generate_logo(&client, "mock-image", &FormState::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::MalformedResponse(_)));
        assert!(err.to_string().contains("logo suggestion"));
    }
}
