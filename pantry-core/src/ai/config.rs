//! AI configuration from environment variables.

use std::env;
use thiserror::Error;

/// Default OpenAI-compatible base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model for reading item photos.
pub const DEFAULT_VISION_MODEL: &str = "gpt-4o";

/// Default model for parsing transcripts.
pub const DEFAULT_TEXT_MODEL: &str = "gpt-4o-mini";

/// Default speech-to-text model.
pub const DEFAULT_TRANSCRIBE_MODEL: &str = "whisper-1";

/// Default language hint for transcription.
pub const DEFAULT_LANGUAGE: &str = "en";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },
}

/// AI client configuration.
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub api_key: String,
    pub base_url: String,
    pub vision_model: String,
    pub text_model: String,
    pub transcribe_model: String,
    pub language: String,
    /// Minimum milliseconds between requests; 0 disables throttling.
    pub rate_limit_ms: u64,
}

impl AiConfig {
    /// Configuration with defaults for everything but the key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            vision_model: DEFAULT_VISION_MODEL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            transcribe_model: DEFAULT_TRANSCRIBE_MODEL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            rate_limit_ms: 0,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `OPENAI_API_KEY`: API key
    ///
    /// Optional:
    /// - `PANTRY_AI_BASE_URL`: API base URL (default: "https://api.openai.com/v1")
    /// - `PANTRY_AI_VISION_MODEL`: Photo model (default: "gpt-4o")
    /// - `PANTRY_AI_TEXT_MODEL`: Transcript model (default: "gpt-4o-mini")
    /// - `PANTRY_AI_TRANSCRIBE_MODEL`: Speech-to-text model (default: "whisper-1")
    /// - `PANTRY_AI_LANGUAGE`: Transcription language (default: "en")
    /// - `PANTRY_AI_RATE_LIMIT_MS`: Rate limit in ms (default: 0)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("OPENAI_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("OPENAI_API_KEY".to_string()))?;

        let mut config = Self::new(api_key);

        if let Some(base_url) = lookup("PANTRY_AI_BASE_URL") {
            config.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Some(model) = lookup("PANTRY_AI_VISION_MODEL") {
            config.vision_model = model;
        }
        if let Some(model) = lookup("PANTRY_AI_TEXT_MODEL") {
            config.text_model = model;
        }
        if let Some(model) = lookup("PANTRY_AI_TRANSCRIBE_MODEL") {
            config.transcribe_model = model;
        }
        if let Some(language) = lookup("PANTRY_AI_LANGUAGE") {
            config.language = language;
        }
        if let Some(value) = lookup("PANTRY_AI_RATE_LIMIT_MS") {
            config.rate_limit_ms = value.parse().map_err(|_| ConfigError::InvalidValue {
                name: "PANTRY_AI_RATE_LIMIT_MS".to_string(),
                value,
            })?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AiConfig::from_lookup(lookup(&[("OPENAI_API_KEY", "sk-test")])).unwrap();
        assert_eq!(config.api_key, "sk-test");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.vision_model, "gpt-4o");
        assert_eq!(config.text_model, "gpt-4o-mini");
        assert_eq!(config.transcribe_model, "whisper-1");
        assert_eq!(config.rate_limit_ms, 0);
    }

    #[test]
    fn test_missing_key() {
        let err = AiConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(name) if name == "OPENAI_API_KEY"));

        let err = AiConfig::from_lookup(lookup(&[("OPENAI_API_KEY", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(_)));
    }

    #[test]
    fn test_overrides() {
        let config = AiConfig::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("PANTRY_AI_BASE_URL", "http://localhost:8080/v1/"),
            ("PANTRY_AI_VISION_MODEL", "gpt-4.1"),
            ("PANTRY_AI_RATE_LIMIT_MS", "250"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:8080/v1");
        assert_eq!(config.vision_model, "gpt-4.1");
        assert_eq!(config.rate_limit_ms, 250);
    }

    #[test]
    fn test_bad_rate_limit() {
        let err = AiConfig::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("PANTRY_AI_RATE_LIMIT_MS", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }
}
