//! HTTP client trait and implementations.
//!
//! The only fetch this system performs is re-downloading a generated dish
//! image, so the trait is deliberately small. `MockClient` stands in for the
//! network in tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

use crate::error::FetchError;

/// Trait for HTTP clients, enabling mockability in tests.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Fetch binary content from a URL.
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// HTTP client backed by reqwest.
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    /// Create a client with a 30 second timeout.
    pub fn new() -> Result<Self, reqwest::Error> {
        let inner = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("crisper/0.1")
            .build()?;
        Ok(Self { inner })
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.inner.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}

/// Mock response for testing.
#[derive(Clone)]
pub enum MockResponse {
    Bytes(Vec<u8>),
    Error(String),
}

/// Mock HTTP client for testing.
pub struct MockClient {
    responses: HashMap<String, MockResponse>,
}

impl MockClient {
    /// Create a new empty mock client.
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
        }
    }

    /// Add a bytes response for a URL.
    pub fn with_bytes(mut self, url: &str, bytes: Vec<u8>) -> Self {
        self.responses
            .insert(url.to_string(), MockResponse::Bytes(bytes));
        self
    }

    /// Add an error response for a URL.
    pub fn with_error(mut self, url: &str, error: &str) -> Self {
        self.responses
            .insert(url.to_string(), MockResponse::Error(error.to_string()));
        self
    }
}

impl Default for MockClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for MockClient {
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        match self.responses.get(url) {
            Some(MockResponse::Bytes(bytes)) => Ok(bytes.clone()),
            Some(MockResponse::Error(e)) => Err(FetchError::InvalidUrl(e.clone())),
            None => Err(FetchError::InvalidUrl(format!(
                "No mock response for URL: {}",
                url
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_client_bytes() {
        let client = MockClient::new().with_bytes("https://x/img.png", vec![1, 2, 3]);
        let bytes = client.fetch_bytes("https://x/img.png").await.unwrap();
        assert_eq!(bytes, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_mock_client_error() {
        let client = MockClient::new().with_error("https://x/img.png", "boom");
        assert!(client.fetch_bytes("https://x/img.png").await.is_err());
    }

    #[tokio::test]
    async fn test_mock_client_unregistered_url() {
        let client = MockClient::new();
        assert!(client.fetch_bytes("https://x/other.png").await.is_err());
    }
}
