//! Chat-completion inference used by the agents.

pub mod openai;
pub mod provider;
pub mod types;

pub use openai::{OpenAIConfig, OpenAIProvider};
pub use provider::LLMProvider;
pub use types::*;
