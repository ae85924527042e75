//! Wire types for the `OpenAI` chat-completions format.
//!
//! `OpenRouter` and most hosted gateways accept the same shapes, so this is
//! the only wire format the kernel speaks.

use crate::inference::types::{ChatRequest, ChatResponse, Message, Usage};
use serde::{Deserialize, Serialize};

/// Request body for `POST chat/completions`
#[derive(Debug, Serialize)]
pub struct OpenAIChatRequest {
    /// The model identifier, e.g. `openai/gpt-4o-2024-05-13`
    pub model: String,
    /// The conversation messages
    pub messages: Vec<Message>,
    /// Generated token limit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// Message inside a returned choice. Content may be `null`.
#[derive(Debug, Deserialize)]
pub struct OpenAIResponseMessage {
    /// Generated text
    #[serde(default)]
    pub content: Option<String>,
}

/// A single completion choice
#[derive(Debug, Deserialize)]
pub struct OpenAIChoice {
    /// The generated message
    pub message: OpenAIResponseMessage,
}

/// Token usage block
#[derive(Debug, Deserialize)]
pub struct OpenAIUsage {
    /// Number of tokens in the prompt
    #[serde(rename = "prompt_tokens")]
    pub prompt: u32,
    /// Number of tokens in the completion
    #[serde(rename = "completion_tokens")]
    pub completion: u32,
    /// Total number of tokens used
    #[serde(rename = "total_tokens")]
    pub total: u32,
}

/// Response body of `POST chat/completions`
#[derive(Debug, Deserialize)]
pub struct OpenAIChatResponse {
    /// The generated completion choices
    pub choices: Vec<OpenAIChoice>,
    /// Token usage information if available
    #[serde(default)]
    pub usage: Option<OpenAIUsage>,
}

/// Maps the wire response to a [`ChatResponse`], reading the first choice.
///
/// # Errors
///
/// Returns an error if no choices are returned in the response.
pub fn map_response(body: OpenAIChatResponse) -> Result<ChatResponse, String> {
    let choice = body
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| "No choices returned".to_string())?;

    Ok(ChatResponse {
        content: choice.message.content.unwrap_or_default(),
        usage: body.usage.map(|u| Usage {
            prompt_tokens: u.prompt,
            completion_tokens: u.completion,
            total_tokens: u.total,
        }),
    })
}

/// Builds the wire request from a [`ChatRequest`].
#[must_use]
pub fn create_request(request: ChatRequest) -> OpenAIChatRequest {
    OpenAIChatRequest {
        model: request.model,
        messages: request.messages,
        max_tokens: request.max_tokens,
        temperature: request.temperature,
    }
}
