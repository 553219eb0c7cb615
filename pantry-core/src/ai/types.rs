//! AI request and response types.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Role in a chat conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// An image attached to a user message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl ImageData {
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }

    /// Guess the MIME type from a file extension, defaulting to JPEG.
    pub fn mime_for_extension(ext: &str) -> &'static str {
        match ext.to_ascii_lowercase().as_str() {
            "png" => "image/png",
            "gif" => "image/gif",
            "webp" => "image/webp",
            "heic" => "image/heic",
            _ => "image/jpeg",
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Inline `data:` URL for the image.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, BASE64.encode(&self.data))
    }
}

/// A recorded audio clip to transcribe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioData {
    pub file_name: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl AudioData {
    /// A WebM clip, the format browsers record by default.
    pub fn webm(data: Vec<u8>) -> Self {
        Self {
            file_name: "audio.webm".to_string(),
            mime_type: "audio/webm".to_string(),
            data,
        }
    }
}

/// A message in a chat conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    #[serde(skip)]
    pub images: Vec<ImageData>,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
            images: vec![],
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            images: vec![],
        }
    }

    /// A user message carrying only images.
    pub fn user_images(images: Vec<ImageData>) -> Self {
        Self {
            role: Role::User,
            content: String::new(),
            images,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            images: vec![],
        }
    }
}

/// Which configured model serves a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModelRole {
    Vision,
    #[default]
    Text,
}

/// Request for a chat completion.
#[derive(Debug, Clone, Default)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub model_role: ModelRole,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    /// If true, request JSON response format.
    pub json_response: bool,
}

/// Token usage information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Response from a chat completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The generated content.
    pub content: String,
    /// Token usage statistics.
    pub usage: Usage,
}
