//! Errors raised while running or steering a game.

use crate::agents::AgentError;
use crate::game::types::{AgentRole, GameState};

/// Errors produced by the orchestrator and the game service.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// An agent call failed or timed out; the game is aborted.
    #[error("{role} failed: {source}")]
    Capability {
        /// The agent whose call failed.
        role: AgentRole,
        /// The underlying failure.
        #[source]
        source: AgentError,
    },
    /// A newer game (or a reset) replaced the one this loop belongs to.
    #[error("game {epoch} was superseded")]
    Superseded {
        /// Epoch of the stale game.
        epoch: u64,
    },
    /// The requested state change is not allowed from the current state.
    #[error("cannot move from {from} to {to}")]
    InvalidTransition {
        /// Current state.
        from: GameState,
        /// Requested state.
        to: GameState,
    },
}

impl GameError {
    /// Whether this error only means the loop lost its game to a newer one.
    #[must_use]
    pub fn is_superseded(&self) -> bool {
        matches!(self, Self::Superseded { .. })
    }
}
