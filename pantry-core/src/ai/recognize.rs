//! Item recognition from photos and speech.

use crate::add_item::MAX_IMAGE_BYTES;
use crate::ai::prompts::image_recognize::{
    render_image_recognize_prompt, IMAGE_RECOGNIZE_MAX_TOKENS, IMAGE_RECOGNIZE_PROMPT_NAME,
};
use crate::ai::prompts::speech_parse::{
    render_speech_parse_system_prompt, render_speech_parse_user_prompt, SPEECH_PARSE_MAX_TOKENS,
    SPEECH_PARSE_PROMPT_NAME,
};
use crate::ai::{AiClient, AiError, AudioData, ChatMessage, ChatRequest, ImageData, ModelRole, Usage};
use crate::normalize::{normalize_with_strategy, ParseStrategy};
use crate::types::RecognizedItem;

/// What the user handed to recognition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecognitionSource {
    Image,
    Speech,
}

impl RecognitionSource {
    fn failure_prefix(&self) -> &'static str {
        match self {
            RecognitionSource::Image => "Recognition failed",
            RecognitionSource::Speech => "Processing failed",
        }
    }
}

#[derive(Debug)]
pub struct RecognitionResult {
    pub item: RecognizedItem,
    pub strategy: ParseStrategy,
    /// The transcript, for speech input.
    pub transcript: Option<String>,
    pub usage: Usage,
}

/// Recognize the most prominent food item in a photo.
pub async fn recognize_image(
    ai_client: &dyn AiClient,
    image: ImageData,
) -> Result<RecognitionResult, AiError> {
    if image.size() > MAX_IMAGE_BYTES {
        return Err(AiError::ImageTooLarge { size: image.size() });
    }

    let request = ChatRequest {
        messages: vec![
            ChatMessage::system(render_image_recognize_prompt()),
            ChatMessage::user_images(vec![image]),
        ],
        model_role: ModelRole::Vision,
        max_tokens: Some(IMAGE_RECOGNIZE_MAX_TOKENS),
        temperature: None,
        json_response: false,
    };

    let response = ai_client
        .complete(IMAGE_RECOGNIZE_PROMPT_NAME, request)
        .await?;

    let (item, strategy) = normalize_reply(IMAGE_RECOGNIZE_PROMPT_NAME, &response.content)?;

    Ok(RecognitionResult {
        item,
        strategy,
        transcript: None,
        usage: response.usage,
    })
}

/// Transcribe a spoken description and parse it into an item.
pub async fn recognize_speech(
    ai_client: &dyn AiClient,
    audio: AudioData,
) -> Result<RecognitionResult, AiError> {
    let transcript = ai_client.transcribe(audio).await?;

    tracing::debug!(transcript = transcript.as_str(), "Transcribed speech input");

    let request = ChatRequest {
        messages: vec![
            ChatMessage::system(render_speech_parse_system_prompt()),
            ChatMessage::user(render_speech_parse_user_prompt(&transcript)),
        ],
        model_role: ModelRole::Text,
        max_tokens: Some(SPEECH_PARSE_MAX_TOKENS),
        temperature: None,
        json_response: false,
    };

    let response = ai_client.complete(SPEECH_PARSE_PROMPT_NAME, request).await?;

    let (item, strategy) = normalize_reply(SPEECH_PARSE_PROMPT_NAME, &response.content)?;

    Ok(RecognitionResult {
        item,
        strategy,
        transcript: Some(transcript),
        usage: response.usage,
    })
}

/// Text to show the user when recognition fails.
pub fn user_message(err: &AiError, source: RecognitionSource) -> String {
    match err {
        AiError::InvalidApiKey
        | AiError::RateLimited
        | AiError::Network(_)
        | AiError::ImageTooLarge { .. } => err.to_string(),
        other => format!("{}: {}", source.failure_prefix(), other),
    }
}

/// An empty reply is read as an empty object, so it yields a defaulted item.
fn normalize_reply(
    prompt_name: &str,
    content: &str,
) -> Result<(RecognizedItem, ParseStrategy), AiError> {
    let content = if content.trim().is_empty() { "{}" } else { content };

    match normalize_with_strategy(content) {
        Ok((item, ParseStrategy::Strict)) => Ok((item, ParseStrategy::Strict)),
        Ok((item, strategy)) => {
            tracing::warn!(
                prompt_name = prompt_name,
                strategy = strategy.as_str(),
                "AI reply was not clean JSON, recovered embedded object"
            );
            Ok((item, strategy))
        }
        Err(e) => {
            tracing::warn!(prompt_name = prompt_name, content = content, "Unparseable AI reply");
            Err(e.into())
        }
    }
}
