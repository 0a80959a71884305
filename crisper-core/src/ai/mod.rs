//! AI client module for LLM integration via an OpenAI-compatible API.
//!
//! This module provides:
//! - `AiClient` trait for abstracting chat/vision providers
//! - `OpenRouterClient` implementation with request rate limiting
//! - `ImageGenerator` trait and DALL-E implementation for dish photos
//! - Prompt templates for the generation pipeline
//!
//! # Configuration
//!
//! Set these environment variables:
//!
//! - `OPENROUTER_API_KEY` (required): API key for the chat endpoint
//! - `CRISPER_AI_MODEL` (optional): Model name, e.g., "openai/gpt-4o"
//! - `CRISPER_AI_BASE_URL` (optional): API base URL
//! - `CRISPER_AI_RATE_LIMIT_MS` (optional): Delay between requests in ms
//! - `OPENAI_API_KEY` (optional): Enables dish-image generation
//! - `CRISPER_IMAGE_MODEL` (optional): Image model name (default "dall-e-3")

mod client;
mod config;
mod fake;
mod fridge_scan;
mod image_gen;
pub mod prompts;
mod recipe_generate;
mod types;

pub use client::{AiClient, AiError, OpenRouterClient};
pub use config::{AiConfig, ConfigError};
pub use fake::FakeAiClient;
pub use fridge_scan::scan_fridge_image;
pub use image_gen::{FakeImageGenerator, ImageGenError, ImageGenerator, OpenAiImageGenerator};
pub use recipe_generate::{
    generate_recipe, Difficulty, GeneratedIngredient, GeneratedRecipe, NutritionalInfo,
};
pub use types::{ChatMessage, ChatRequest, ChatResponse, ImageData, Role, Usage};
