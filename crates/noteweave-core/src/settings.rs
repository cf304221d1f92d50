//! Generation settings consumed from the host settings store.
//!
//! Settings are immutable during one invocation: the engine receives a
//! snapshot per command trigger and a change-notification channel for the
//! bootstrap subscription, never a live mutable reference.

use serde::{Deserialize, Serialize};

use crate::defaults;

/// Remote generation provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    OpenAi,
    Ollama,
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OpenAi => write!(f, "openai"),
            Self::Ollama => write!(f, "ollama"),
        }
    }
}

/// Configuration record for one generation invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerationSettings {
    /// Provider selector.
    pub provider: Provider,
    /// Endpoint base URL.
    pub endpoint: String,
    /// Static bearer token; empty for providers that need none.
    pub api_key: String,
    /// Model name.
    pub model: String,
    /// Sampling temperature, 0.0–1.0.
    pub temperature: f32,
    /// Maximum output tokens.
    pub max_tokens: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            endpoint: defaults::OPENAI_URL.to_string(),
            api_key: String::new(),
            model: defaults::GEN_MODEL.to_string(),
            temperature: defaults::TEMPERATURE,
            max_tokens: defaults::MAX_TOKENS,
        }
    }
}

impl GenerationSettings {
    /// Clamp the temperature into the supported 0.0–1.0 range.
    pub fn clamped(mut self) -> Self {
        self.temperature = self.temperature.clamp(0.0, 1.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_schema() {
        let settings = GenerationSettings::default();
        assert_eq!(settings.provider, Provider::OpenAi);
        assert_eq!(settings.endpoint, "https://api.openai.com/v1");
        assert_eq!(settings.api_key, "");
        assert_eq!(settings.model, "gpt-3.5-turbo");
        assert_eq!(settings.temperature, 0.7);
        assert_eq!(settings.max_tokens, 2000);
    }

    #[test]
    fn test_empty_object_deserializes_to_defaults() {
        let settings: GenerationSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, GenerationSettings::default());
    }

    #[test]
    fn test_camel_case_field_names() {
        let json = r#"{"provider": "ollama", "apiKey": "k", "maxTokens": 512}"#;
        let settings: GenerationSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.provider, Provider::Ollama);
        assert_eq!(settings.api_key, "k");
        assert_eq!(settings.max_tokens, 512);
    }

    #[test]
    fn test_provider_serde_names() {
        assert_eq!(serde_json::to_string(&Provider::OpenAi).unwrap(), "\"openai\"");
        assert_eq!(serde_json::to_string(&Provider::Ollama).unwrap(), "\"ollama\"");
    }

    #[test]
    fn test_temperature_clamped() {
        let settings = GenerationSettings {
            temperature: 1.7,
            ..Default::default()
        }
        .clamped();
        assert_eq!(settings.temperature, 1.0);

        let settings = GenerationSettings {
            temperature: -0.2,
            ..Default::default()
        }
        .clamped();
        assert_eq!(settings.temperature, 0.0);
    }

    #[test]
    fn test_provider_display() {
        assert_eq!(Provider::OpenAi.to_string(), "openai");
        assert_eq!(Provider::Ollama.to_string(), "ollama");
    }
}
