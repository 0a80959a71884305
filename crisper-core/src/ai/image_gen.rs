//! Dish image generation via the OpenAI images REST API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImageGenError {
    #[error("Image generation not configured: {0}")]
    NotConfigured(String),

    #[error("Image generation request failed: {0}")]
    RequestFailed(String),

    #[error("Image API returned error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Image API returned no image URL")]
    EmptyResponse,
}

/// Trait for image generators.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generate an image from a prompt and return the provider's URL for it.
    async fn generate(&self, prompt: &str) -> Result<String, ImageGenError>;
}

/// Image generator backed by OpenAI's `/v1/images/generations` endpoint.
pub struct OpenAiImageGenerator {
    api_key: String,
    model: String,
    size: String,
    client: reqwest::Client,
}

impl OpenAiImageGenerator {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            size: "1024x1024".to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Create a generator from environment configuration.
    ///
    /// Requires `OPENAI_API_KEY`; `CRISPER_IMAGE_MODEL` overrides the default
    /// "dall-e-3".
    pub fn from_env() -> Result<Self, ImageGenError> {
        let api_key = env::var("OPENAI_API_KEY")
            .map_err(|_| ImageGenError::NotConfigured("OPENAI_API_KEY not set".to_string()))?;
        let model =
            env::var("CRISPER_IMAGE_MODEL").unwrap_or_else(|_| "dall-e-3".to_string());
        Ok(Self::new(api_key, model))
    }
}

/// Image generation request format.
#[derive(Debug, Serialize)]
struct ImageGenRequest {
    model: String,
    prompt: String,
    size: String,
    quality: String,
    n: u32,
}

#[derive(Debug, Deserialize)]
struct ImageGenResponse {
    data: Vec<GeneratedImage>,
}

#[derive(Debug, Deserialize)]
struct GeneratedImage {
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ImageApiError {
    message: String,
}

/// Error response from the images API.
#[derive(Debug, Deserialize)]
struct ImageErrorResponse {
    error: ImageApiError,
}

#[async_trait]
impl ImageGenerator for OpenAiImageGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, ImageGenError> {
        let request = ImageGenRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            size: self.size.clone(),
            quality: "standard".to_string(),
            n: 1,
        };

        let response = self
            .client
            .post("https://api.openai.com/v1/images/generations")
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ImageGenError::RequestFailed(e.to_string()))?;

        let status = response.status().as_u16();

        let body = response
            .text()
            .await
            .map_err(|e| ImageGenError::RequestFailed(e.to_string()))?;

        if status != 200 {
            if let Ok(error_response) = serde_json::from_str::<ImageErrorResponse>(&body) {
                return Err(ImageGenError::ApiError {
                    status,
                    message: error_response.error.message,
                });
            }
            return Err(ImageGenError::ApiError {
                status,
                message: body,
            });
        }

        let response: ImageGenResponse = serde_json::from_str(&body)
            .map_err(|e| ImageGenError::RequestFailed(format!("Invalid response body: {}", e)))?;

        response
            .data
            .into_iter()
            .next()
            .and_then(|d| d.url)
            .ok_or(ImageGenError::EmptyResponse)
    }
}

/// Fake image generator for testing.
pub struct FakeImageGenerator {
    result: Result<String, String>,
}

impl FakeImageGenerator {
    /// Always returns the given URL.
    pub fn with_url(url: &str) -> Self {
        Self {
            result: Ok(url.to_string()),
        }
    }

    /// Always fails with the given message.
    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
        }
    }
}

#[async_trait]
impl ImageGenerator for FakeImageGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, ImageGenError> {
        match &self.result {
            Ok(url) => Ok(url.clone()),
            Err(message) => Err(ImageGenError::RequestFailed(message.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_success_response() {
        let body = r#"{"created": 1700000000, "data": [{"url": "https://img.example/dish.png"}]}"#;
        let parsed: ImageGenResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            parsed.data[0].url.as_deref(),
            Some("https://img.example/dish.png")
        );
    }

    #[test]
    fn test_parse_error_response() {
        let body = r#"{"error": {"message": "billing hard limit reached", "type": "invalid_request_error"}}"#;
        let parsed: ImageErrorResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.error.message, "billing hard limit reached");
    }

    #[tokio::test]
    async fn test_fake_generator() {
        let generator = FakeImageGenerator::with_url("https://img.example/dish.png");
        assert_eq!(
            generator.generate("a dish").await.unwrap(),
            "https://img.example/dish.png"
        );

        let failing = FakeImageGenerator::failing("quota exceeded");
        assert!(failing.generate("a dish").await.is_err());
    }
}
