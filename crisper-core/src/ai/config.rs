//! AI configuration from environment variables.

use std::env;
use thiserror::Error;

/// Default OpenRouter base URL.
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Default model. Must be vision-capable: the ingredient scan sends the
/// fridge photo as an image part.
pub const DEFAULT_MODEL: &str = "openai/gpt-4o";

/// Default rate limit between requests in milliseconds.
pub const DEFAULT_RATE_LIMIT_MS: u64 = 500;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),
}

/// AI client configuration.
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// API key for the chat endpoint.
    pub api_key: String,
    /// Model name (e.g., "openai/gpt-4o").
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Milliseconds to wait between requests.
    pub rate_limit_ms: u64,
}

impl AiConfig {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `OPENROUTER_API_KEY`
    ///
    /// Optional:
    /// - `CRISPER_AI_MODEL` (default: "openai/gpt-4o")
    /// - `CRISPER_AI_BASE_URL` (default: "https://openrouter.ai/api/v1")
    /// - `CRISPER_AI_RATE_LIMIT_MS` (default: 500)
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var("OPENROUTER_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("OPENROUTER_API_KEY".to_string()))?;

        let model = env::var("CRISPER_AI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let base_url =
            env::var("CRISPER_AI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let rate_limit_ms = env::var("CRISPER_AI_RATE_LIMIT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_RATE_LIMIT_MS);

        Ok(Self {
            api_key,
            model,
            base_url,
            rate_limit_ms,
        })
    }
}
