//! Fake AI client for testing.
//!
//! Replies are queued ahead of time and handed out in order, so tests can
//! exercise recognition without network access or API costs.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use super::client::{AiClient, AiError};
use super::types::{AudioData, ChatRequest, ChatResponse, Usage};

/// A scripted AI client.
///
/// Chat replies and transcripts come from separate queues. When a queue is
/// empty the client falls back to its default reply, or fails if none is set.
#[derive(Debug, Default)]
pub struct FakeAiClient {
    replies: Mutex<VecDeque<Result<String, AiError>>>,
    transcripts: Mutex<VecDeque<Result<String, AiError>>>,
    default_reply: Option<String>,
    requests: Mutex<Vec<(String, ChatRequest)>>,
}

fn locked<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl FakeAiClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// A client whose next chat reply is `content`.
    pub fn with_reply(content: &str) -> Self {
        let client = Self::new();
        client.push_reply(content);
        client
    }

    /// Set the reply used once the queue runs dry.
    pub fn with_default_reply(mut self, content: &str) -> Self {
        self.default_reply = Some(content.to_string());
        self
    }

    pub fn push_reply(&self, content: &str) {
        locked(&self.replies).push_back(Ok(content.to_string()));
    }

    pub fn push_error(&self, error: AiError) {
        locked(&self.replies).push_back(Err(error));
    }

    pub fn push_transcript(&self, text: &str) {
        locked(&self.transcripts).push_back(Ok(text.to_string()));
    }

    pub fn push_transcript_error(&self, error: AiError) {
        locked(&self.transcripts).push_back(Err(error));
    }

    /// Chat requests received so far, with their prompt names.
    pub fn requests(&self) -> Vec<(String, ChatRequest)> {
        locked(&self.requests).clone()
    }
}

#[async_trait]
impl AiClient for FakeAiClient {
    async fn complete(
        &self,
        prompt_name: &str,
        request: ChatRequest,
    ) -> Result<ChatResponse, AiError> {
        locked(&self.requests).push((prompt_name.to_string(), request));

        let next = locked(&self.replies).pop_front();
        let content = match next {
            Some(reply) => reply?,
            None => self.default_reply.clone().ok_or_else(|| {
                AiError::Api(format!(
                    "FakeAiClient: No reply configured for prompt {}",
                    prompt_name
                ))
            })?,
        };

        Ok(ChatResponse {
            content,
            usage: Usage::default(),
        })
    }

    async fn transcribe(&self, _audio: AudioData) -> Result<String, AiError> {
        locked(&self.transcripts)
            .pop_front()
            .unwrap_or_else(|| Err(AiError::Api("FakeAiClient: No transcript configured".to_string())))
    }
}
