//! AI client module for the recognition service.
//!
//! This module provides:
//! - `AiClient` trait for abstracting the service, injected into callers
//! - `OpenAiClient` for OpenAI-compatible endpoints and `FakeAiClient` for tests
//! - Configuration via environment variables
//! - Prompt templates and the photo/speech recognition flows
//!
//! # Configuration
//!
//! Set these environment variables:
//!
//! - `OPENAI_API_KEY` (required): API key
//! - `PANTRY_AI_BASE_URL` (optional): API base URL
//! - `PANTRY_AI_VISION_MODEL` (optional): Model for photos, e.g., "gpt-4o"
//! - `PANTRY_AI_TEXT_MODEL` (optional): Model for transcripts, e.g., "gpt-4o-mini"
//! - `PANTRY_AI_TRANSCRIBE_MODEL` (optional): Speech-to-text model
//! - `PANTRY_AI_RATE_LIMIT_MS` (optional): Delay between requests in ms
//!
//! # Example
//!
//! ```ignore
//! use pantry_core::ai::{recognize_image, ImageData, OpenAiClient};
//!
//! let client = OpenAiClient::from_env()?;
//! let image = ImageData::new("image/jpeg", std::fs::read("milk.jpg")?);
//!
//! let result = recognize_image(&client, image).await?;
//! println!("{} ({})", result.item.name, result.item.quantity);
//! ```

mod client;
mod config;
mod fake;
pub mod prompts;
mod recognize;
mod types;

pub use client::{AiClient, AiError, OpenAiClient};
pub use config::{AiConfig, ConfigError};
pub use fake::FakeAiClient;
pub use recognize::{
    recognize_image, recognize_speech, user_message, RecognitionResult, RecognitionSource,
};
pub use types::{
    AudioData, ChatMessage, ChatRequest, ChatResponse, ImageData, ModelRole, Role, Usage,
};
