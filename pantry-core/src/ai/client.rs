//! AI client implementation using an OpenAI-compatible API.

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestMessageContentPartImageArgs,
        ChatCompletionRequestMessageContentPartTextArgs, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, ChatCompletionRequestUserMessageContentPart,
        CreateChatCompletionRequestArgs, ImageDetail, ImageUrlArgs, ResponseFormat,
    },
    Client,
};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::time::Instant;

use super::config::{AiConfig, ConfigError};
use super::types::{AudioData, ChatMessage, ChatRequest, ChatResponse, ModelRole, Role, Usage};
use crate::error::NormalizationError;

#[derive(Error, Debug)]
pub enum AiError {
    #[error("Invalid API key. Please check your OpenAI API key.")]
    InvalidApiKey,

    #[error("Rate limit exceeded. Please try again in a moment.")]
    RateLimited,

    #[error("Network error. Please check your internet connection.")]
    Network(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Image is too large. Please use an image smaller than 20MB.")]
    ImageTooLarge { size: usize },

    #[error(transparent)]
    Normalize(#[from] NormalizationError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl AiError {
    /// Sort a provider error message into the failure the user can act on.
    pub fn from_api_message(message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_lowercase();

        if lower.contains("api key") || lower.contains("api_key") {
            AiError::InvalidApiKey
        } else if lower.contains("rate limit") || lower.contains("rate_limit") {
            AiError::RateLimited
        } else if lower.contains("network")
            || lower.contains("error sending request")
            || lower.contains("connection")
            || lower.contains("timed out")
        {
            AiError::Network(message)
        } else {
            AiError::Api(message)
        }
    }

    fn from_status(status: u16, body: String) -> Self {
        match status {
            401 => AiError::InvalidApiKey,
            429 => AiError::RateLimited,
            _ => AiError::from_api_message(format!("{} - {}", status, body)),
        }
    }
}

/// Trait for AI clients.
#[async_trait]
pub trait AiClient: Send + Sync {
    /// Complete a chat request.
    ///
    /// The `prompt_name` only labels the call in logs.
    async fn complete(&self, prompt_name: &str, request: ChatRequest)
        -> Result<ChatResponse, AiError>;

    /// Transcribe a recorded audio clip to text.
    async fn transcribe(&self, audio: AudioData) -> Result<String, AiError>;
}

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

/// AI client for OpenAI-compatible endpoints, with optional rate limiting.
pub struct OpenAiClient {
    client: Client<OpenAIConfig>,
    http: reqwest::Client,
    config: AiConfig,
    last_request: Arc<Mutex<Option<Instant>>>,
}

impl OpenAiClient {
    /// Create a new client from environment configuration.
    pub fn from_env() -> Result<Self, AiError> {
        let config = AiConfig::from_env()?;
        Ok(Self::new(config))
    }

    /// Create a new client with the given configuration.
    pub fn new(config: AiConfig) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.api_key)
            .with_api_base(&config.base_url);

        Self {
            client: Client::with_config(openai_config),
            http: reqwest::Client::new(),
            config,
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    fn model_for(&self, role: ModelRole) -> &str {
        match role {
            ModelRole::Vision => &self.config.vision_model,
            ModelRole::Text => &self.config.text_model,
        }
    }

    /// Apply rate limiting between requests.
    async fn rate_limit(&self) {
        if self.config.rate_limit_ms == 0 {
            return;
        }

        let mut last = self.last_request.lock().await;

        if let Some(last_time) = *last {
            let elapsed = last_time.elapsed();
            let min_interval = Duration::from_millis(self.config.rate_limit_ms);

            if elapsed < min_interval {
                tokio::time::sleep(min_interval - elapsed).await;
            }
        }

        *last = Some(Instant::now());
    }

    /// Convert our ChatMessage to async-openai's format.
    fn to_openai_message(msg: &ChatMessage) -> Result<ChatCompletionRequestMessage, AiError> {
        let build_err = |kind: &str, e: async_openai::error::OpenAIError| {
            AiError::Api(format!("Failed to build {} message: {}", kind, e))
        };

        match msg.role {
            Role::System => ChatCompletionRequestSystemMessageArgs::default()
                .content(msg.content.clone())
                .build()
                .map(Into::into)
                .map_err(|e| build_err("system", e)),
            Role::User if msg.images.is_empty() => ChatCompletionRequestUserMessageArgs::default()
                .content(msg.content.clone())
                .build()
                .map(Into::into)
                .map_err(|e| build_err("user", e)),
            Role::User => {
                let mut parts: Vec<ChatCompletionRequestUserMessageContentPart> = Vec::new();

                if !msg.content.is_empty() {
                    let text = ChatCompletionRequestMessageContentPartTextArgs::default()
                        .text(msg.content.clone())
                        .build()
                        .map_err(|e| build_err("user", e))?;
                    parts.push(text.into());
                }

                for image in &msg.images {
                    let image_url = ImageUrlArgs::default()
                        .url(image.to_data_url())
                        .detail(ImageDetail::Auto)
                        .build()
                        .map_err(|e| build_err("user", e))?;
                    let part = ChatCompletionRequestMessageContentPartImageArgs::default()
                        .image_url(image_url)
                        .build()
                        .map_err(|e| build_err("user", e))?;
                    parts.push(part.into());
                }

                ChatCompletionRequestUserMessageArgs::default()
                    .content(parts)
                    .build()
                    .map(Into::into)
                    .map_err(|e| build_err("user", e))
            }
            Role::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
                .content(msg.content.clone())
                .build()
                .map(Into::into)
                .map_err(|e| build_err("assistant", e)),
        }
    }
}

#[async_trait]
impl AiClient for OpenAiClient {
    async fn complete(
        &self,
        prompt_name: &str,
        request: ChatRequest,
    ) -> Result<ChatResponse, AiError> {
        self.rate_limit().await;

        let messages: Vec<ChatCompletionRequestMessage> = request
            .messages
            .iter()
            .map(Self::to_openai_message)
            .collect::<Result<Vec<_>, _>>()?;

        let model = self.model_for(request.model_role);

        let mut req_builder = CreateChatCompletionRequestArgs::default();
        req_builder.model(model).messages(messages);

        if let Some(max_tokens) = request.max_tokens {
            req_builder.max_completion_tokens(max_tokens);
        }

        if let Some(temperature) = request.temperature {
            req_builder.temperature(temperature);
        }

        if request.json_response {
            req_builder.response_format(ResponseFormat::JsonObject);
        }

        let openai_request = req_builder
            .build()
            .map_err(|e| AiError::Api(e.to_string()))?;

        tracing::debug!(prompt_name = prompt_name, model = model, "Calling AI API");

        let response = self
            .client
            .chat()
            .create(openai_request)
            .await
            .map_err(|e| AiError::from_api_message(e.to_string()))?;

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .unwrap_or_default();

        let usage = response
            .usage
            .map(|u| Usage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            })
            .unwrap_or_default();

        Ok(ChatResponse { content, usage })
    }

    async fn transcribe(&self, audio: AudioData) -> Result<String, AiError> {
        self.rate_limit().await;

        let file = reqwest::multipart::Part::bytes(audio.data)
            .file_name(audio.file_name)
            .mime_str(&audio.mime_type)
            .map_err(|e| AiError::Api(format!("Invalid audio MIME type: {}", e)))?;

        let form = reqwest::multipart::Form::new()
            .part("file", file)
            .text("model", self.config.transcribe_model.clone())
            .text("language", self.config.language.clone());

        tracing::debug!(model = &self.config.transcribe_model, "Calling transcription API");

        let response = self
            .http
            .post(format!("{}/audio/transcriptions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AiError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| AiError::Network(e.to_string()))?;

        if status != 200 {
            return Err(AiError::from_status(status, body));
        }

        let transcription: TranscriptionResponse = serde_json::from_str(&body)
            .map_err(|e| AiError::Api(format!("Failed to parse transcription response: {}", e)))?;

        Ok(transcription.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::types::ImageData;

    #[test]
    fn test_error_classification() {
        assert!(matches!(
            AiError::from_api_message("Incorrect API key provided: sk-***"),
            AiError::InvalidApiKey
        ));
        assert!(matches!(
            AiError::from_api_message("Rate limit reached for gpt-4o"),
            AiError::RateLimited
        ));
        assert!(matches!(
            AiError::from_api_message("http error: error sending request for url"),
            AiError::Network(_)
        ));
        assert!(matches!(
            AiError::from_api_message("The model does not exist"),
            AiError::Api(_)
        ));
    }

    #[test]
    fn test_status_classification() {
        assert!(matches!(
            AiError::from_status(401, String::new()),
            AiError::InvalidApiKey
        ));
        assert!(matches!(
            AiError::from_status(429, String::new()),
            AiError::RateLimited
        ));
        assert!(matches!(
            AiError::from_status(500, "boom".to_string()),
            AiError::Api(message) if message == "500 - boom"
        ));
    }

    #[test]
    fn test_image_message_converts() {
        let msg = ChatMessage::user_images(vec![ImageData::new("image/png", vec![1, 2, 3])]);
        let converted = OpenAiClient::to_openai_message(&msg).unwrap();
        assert!(matches!(converted, ChatCompletionRequestMessage::User(_)));
    }

    #[test]
    fn test_model_for_role() {
        let client = OpenAiClient::new(AiConfig::new("sk-test"));
        assert_eq!(client.model_for(ModelRole::Vision), "gpt-4o");
        assert_eq!(client.model_for(ModelRole::Text), "gpt-4o-mini");
    }
}
