//! Request types for chat completions.

use crate::inference::types::message::Message;

/// Request for a chat completion.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// The model to use for completion
    pub model: String,
    /// The conversation so far
    pub messages: Vec<Message>,
    /// Upper bound on generated tokens
    pub max_tokens: Option<u32>,
    /// Sampling temperature
    pub temperature: Option<f32>,
}

impl ChatRequest {
    /// Creates a request holding a single user prompt.
    #[must_use]
    pub fn with_prompt(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: vec![Message::user(prompt)],
            max_tokens: None,
            temperature: None,
        }
    }

    /// Sets the generated token limit.
    #[must_use]
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Sets the sampling temperature.
    #[must_use]
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}
