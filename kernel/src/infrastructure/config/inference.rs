//! Language-model endpoint and sampling settings.

use config::ConfigError;
use reqwest::Url;
use secrecy::SecretString;
use serde::Deserialize;

use crate::agents::SamplingSettings;
use crate::inference::OpenAIConfig;

/// Inference provider settings.
#[derive(Debug, Deserialize, Clone)]
pub struct InferenceSettings {
    /// Bearer token for the OpenAI-compatible endpoint.
    pub api_key: Option<SecretString>,
    /// Endpoint root; `chat/completions` is appended.
    pub base_url: String,
    /// Model identifier.
    pub model: String,
    /// Generated token limit per call.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
    /// Retries for transient provider failures.
    pub max_retries: u32,
    /// First backoff delay in milliseconds.
    pub base_delay_ms: u64,
}

impl InferenceSettings {
    /// Sampling options shared by all agents.
    #[must_use]
    pub fn sampling(&self) -> SamplingSettings {
        SamplingSettings {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }

    /// Builds the HTTP provider configuration. A missing key is sent as an
    /// empty bearer token.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not a valid URL.
    pub fn provider_config(&self) -> Result<OpenAIConfig, ConfigError> {
        let base_url = Url::parse(&self.base_url).map_err(|e| {
            ConfigError::Message(format!("Invalid inference.base_url '{}': {e}", self.base_url))
        })?;
        let api_key = self
            .api_key
            .clone()
            .unwrap_or_else(|| SecretString::new(String::new().into()));
        Ok(OpenAIConfig::new(api_key, base_url)
            .with_max_retries(self.max_retries)
            .with_base_delay_ms(self.base_delay_ms))
    }
}
