//! Agent capability seam.
//!
//! The orchestrator only knows the [`AgentCapability`] trait. [`LlmAgents`]
//! implements it on top of an [`LLMProvider`](crate::inference::LLMProvider);
//! tests substitute scripted agents.

pub mod llm;
pub mod prompts;

pub use llm::{LlmAgents, SamplingSettings};

use crate::game::types::Helper;
use crate::inference::InferenceError;
use async_trait::async_trait;
use std::time::Duration;

/// Failure of a single agent call.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AgentError {
    /// The language-model provider rejected the call.
    #[error(transparent)]
    Inference(#[from] InferenceError),
    /// No answer arrived before the per-call deadline.
    #[error("No response within {0:?}")]
    Timeout(Duration),
}

impl AgentError {
    /// Whether the call ran out of time rather than failing outright.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}

/// The three agent operations a game needs.
///
/// Implementations return the raw reply text; the orchestrator trims and
/// normalises it.
#[async_trait]
pub trait AgentCapability: Send + Sync {
    /// Asks `helper` for a one-word clue about `secret_word`.
    async fn helper_clue(
        &self,
        helper: Helper,
        secret_word: &str,
        history: &[String],
        round: u32,
    ) -> Result<String, AgentError>;

    /// Asks the Oracle for its best one-word guess given `history`.
    async fn guesser_guess(&self, history: &[String]) -> Result<String, AgentError>;
}
