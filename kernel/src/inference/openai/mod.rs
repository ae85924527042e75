//! `OpenAI`-compatible provider implementation.

pub mod client;
pub mod mapping;
pub mod retry;

pub use client::{OpenAIConfig, OpenAIProvider};
pub use mapping::{OpenAIChatRequest, OpenAIChatResponse, create_request, map_response};
pub use retry::{DEFAULT_BASE_DELAY_MS, DEFAULT_MAX_RETRIES, MAX_DELAY_MS, RetryConfig};
