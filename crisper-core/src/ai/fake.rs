//! Fake AI client for testing.
//!
//! Responses are matched by checking if the prompt contains a registered
//! substring, allowing tests to run without network access or API costs.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use super::client::{AiClient, AiError};
use super::types::{ChatRequest, ChatResponse, Usage};

/// A fake AI client for testing.
///
/// If no registered substring matches, returns the default response or an
/// error when none is set.
pub struct FakeAiClient {
    /// Map of prompt substring -> response content
    responses: RwLock<HashMap<String, String>>,
    /// Default response if no match found
    default_response: Option<String>,
}

impl FakeAiClient {
    /// Create a new FakeAiClient with no registered responses.
    pub fn new() -> Self {
        Self {
            responses: RwLock::new(HashMap::new()),
            default_response: None,
        }
    }

    /// Create a FakeAiClient that returns a specific response for prompts
    /// containing a substring.
    pub fn with_response(prompt_contains: &str, response: &str) -> Self {
        let mut client = Self::new();
        client.add_response(prompt_contains, response);
        client
    }

    /// Add a response for prompts containing a specific substring.
    pub fn add_response(&mut self, prompt_contains: &str, response: &str) {
        self.responses
            .write()
            .unwrap()
            .insert(prompt_contains.to_string(), response.to_string());
    }

    /// Set the default response when no pattern matches.
    pub fn with_default_response(mut self, response: &str) -> Self {
        self.default_response = Some(response.to_string());
        self
    }
}

impl Default for FakeAiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AiClient for FakeAiClient {
    async fn complete(
        &self,
        _prompt_name: &str,
        request: ChatRequest,
    ) -> Result<ChatResponse, AiError> {
        let prompt = request
            .messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        let responses = self.responses.read().unwrap();

        let prompt_lower = prompt.to_lowercase();
        for (pattern, response) in responses.iter() {
            if prompt_lower.contains(&pattern.to_lowercase()) {
                return Ok(ChatResponse {
                    content: response.clone(),
                    usage: Usage::default(),
                });
            }
        }

        match &self.default_response {
            Some(response) => Ok(ChatResponse {
                content: response.clone(),
                usage: Usage::default(),
            }),
            None => Err(AiError::Api(format!(
                "FakeAiClient: No response configured for prompt (first 100 chars): {}",
                &prompt[..prompt.len().min(100)]
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::ChatMessage;

    fn request(prompt: &str) -> ChatRequest {
        ChatRequest {
            messages: vec![ChatMessage::user(prompt)],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_fake_client_matching() {
        let client = FakeAiClient::with_response("hello", "world");
        let result = client.complete("t", request("Say hello")).await.unwrap();
        assert_eq!(result.content, "world");
    }

    #[tokio::test]
    async fn test_fake_client_case_insensitive() {
        let client = FakeAiClient::with_response("HELLO", "world");
        let result = client.complete("t", request("hello there")).await.unwrap();
        assert_eq!(result.content, "world");
    }

    #[tokio::test]
    async fn test_fake_client_no_match() {
        let client = FakeAiClient::new();
        let result = client.complete("t", request("random prompt")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_fake_client_default_response() {
        let client = FakeAiClient::new().with_default_response("default");
        let result = client.complete("t", request("anything")).await.unwrap();
        assert_eq!(result.content, "default");
    }
}
