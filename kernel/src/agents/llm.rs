//! Agents backed by a chat-completion provider.

use crate::agents::prompts::{guesser_prompt, helper_prompt};
use crate::agents::{AgentCapability, AgentError};
use crate::game::types::Helper;
use crate::inference::{ChatRequest, LLMProvider};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Model and sampling options shared by all three roles.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingSettings {
    /// Model identifier passed to the provider
    pub model: String,
    /// Generated token limit
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
}

/// Helpers and Oracle that each send one single-message prompt per turn.
pub struct LlmAgents {
    provider: Arc<dyn LLMProvider>,
    sampling: SamplingSettings,
}

impl LlmAgents {
    /// Wraps `provider`.
    #[must_use]
    pub fn new(provider: Arc<dyn LLMProvider>, sampling: SamplingSettings) -> Self {
        Self { provider, sampling }
    }

    async fn complete(&self, prompt: String) -> Result<String, AgentError> {
        let request = ChatRequest::with_prompt(self.sampling.model.clone(), prompt)
            .max_tokens(self.sampling.max_tokens)
            .temperature(self.sampling.temperature);
        let response = self.provider.chat(request).await?;
        debug!(reply = %response.content, "Agent replied");
        Ok(response.content)
    }
}

#[async_trait]
impl AgentCapability for LlmAgents {
    #[instrument(skip(self, secret_word, history), fields(history_len = history.len()))]
    async fn helper_clue(
        &self,
        helper: Helper,
        secret_word: &str,
        history: &[String],
        round: u32,
    ) -> Result<String, AgentError> {
        self.complete(helper_prompt(helper, secret_word, history, round))
            .await
    }

    #[instrument(skip(self, history), fields(history_len = history.len()))]
    async fn guesser_guess(&self, history: &[String]) -> Result<String, AgentError> {
        self.complete(guesser_prompt(history)).await
    }
}
