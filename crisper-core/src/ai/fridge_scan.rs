//! Ingredient identification from a fridge photo using vision AI.

use crate::ai::prompts::fridge_scan::{render_fridge_scan_prompt, FRIDGE_SCAN_PROMPT_NAME};
use crate::ai::{AiClient, AiError, ChatMessage, ChatRequest, ImageData};

/// Submit the fridge photo to a vision-capable model and return its free-text
/// ingredient description.
pub async fn scan_fridge_image(
    ai_client: &dyn AiClient,
    image_url: &str,
) -> Result<String, AiError> {
    let prompt = render_fridge_scan_prompt();
    let request = ChatRequest {
        messages: vec![ChatMessage::user_with_images(
            prompt,
            vec![ImageData {
                url: image_url.to_string(),
            }],
        )],
        json_response: false,
        max_tokens: Some(1024),
        temperature: Some(0.2),
    };

    let response = ai_client.complete(FRIDGE_SCAN_PROMPT_NAME, request).await?;

    let summary = response.content.trim().to_string();
    if summary.is_empty() {
        return Err(AiError::ParseError(
            "Empty ingredient analysis from model".to_string(),
        ));
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::FakeAiClient;

    #[tokio::test]
    async fn test_scan_returns_trimmed_text() {
        let client = FakeAiClient::with_response("fridge photo", "  eggs, milk, spinach \n");
        let summary = scan_fridge_image(&client, "https://x/fridge.jpg")
            .await
            .unwrap();
        assert_eq!(summary, "eggs, milk, spinach");
    }

    #[tokio::test]
    async fn test_scan_rejects_empty_response() {
        let client = FakeAiClient::with_response("fridge photo", "   ");
        let result = scan_fridge_image(&client, "https://x/fridge.jpg").await;
        assert!(matches!(result, Err(AiError::ParseError(_))));
    }
}
