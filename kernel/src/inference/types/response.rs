//! Response types for chat completions.

use serde::{Deserialize, Serialize};

/// Token usage reported by the provider.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Usage {
    /// Number of tokens in the prompt
    pub prompt_tokens: u32,
    /// Number of tokens in the completion
    pub completion_tokens: u32,
    /// Total number of tokens used
    pub total_tokens: u32,
}

/// Response from a chat completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The generated text, empty when the model produced none
    pub content: String,
    /// Token usage, if the provider reported it
    pub usage: Option<Usage>,
}

impl ChatResponse {
    /// Creates a response without usage information.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            usage: None,
        }
    }

    /// Returns the total token count if available.
    #[must_use]
    pub fn total_tokens(&self) -> Option<u32> {
        self.usage.map(|u| u.total_tokens)
    }
}
