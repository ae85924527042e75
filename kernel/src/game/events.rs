//! Events published to the presentation layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::agents::AgentError;
use crate::game::types::{AgentRole, GameResult, Message, TurnPhase};

/// Hint shown next to an abort reason.
pub const ABORT_HINT: &str = "Check your API key or word.";

/// Identity and time of an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMetadata {
    /// Unique identifier for this event.
    pub event_id: String,
    /// When the event was produced.
    pub timestamp: DateTime<Utc>,
}

impl EventMetadata {
    /// Metadata stamped now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            event_id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
        }
    }
}

impl Default for EventMetadata {
    fn default() -> Self {
        Self::new()
    }
}

/// Why a game stopped before producing a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbortNotice {
    /// The agent whose call failed.
    pub agent: AgentRole,
    /// Failure message, verbatim.
    pub message: String,
    /// Generic advice for the player.
    pub hint: String,
    /// Whether the call hit its deadline instead of failing.
    pub timed_out: bool,
}

impl AbortNotice {
    /// Builds the notice for a failed call by `agent`.
    #[must_use]
    pub fn new(agent: AgentRole, error: &AgentError) -> Self {
        Self {
            agent,
            message: error.to_string(),
            hint: ABORT_HINT.to_string(),
            timed_out: error.is_timeout(),
        }
    }
}

/// Everything the orchestrator and the service announce, tagged by `type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// A new game began with an empty history.
    GameStarted {
        /// Game epoch.
        epoch: u64,
        /// Round bound in force.
        max_rounds: u32,
        /// Event metadata.
        metadata: EventMetadata,
    },
    /// An agent was asked for its turn.
    AgentTurnStarted {
        /// Game epoch.
        epoch: u64,
        /// Active agent.
        agent: AgentRole,
        /// Current round.
        round: u32,
        /// Current sub-phase.
        phase: TurnPhase,
        /// Event metadata.
        metadata: EventMetadata,
    },
    /// An agent answered; the entry was appended to the history.
    AgentTurnCompleted {
        /// Game epoch.
        epoch: u64,
        /// Agent that answered.
        agent: AgentRole,
        /// Current round.
        round: u32,
        /// Rendered conversation message.
        message: Message,
        /// History entry appended for this turn.
        entry: String,
        /// History length after the append.
        history_len: usize,
        /// Event metadata.
        metadata: EventMetadata,
    },
    /// The game finished with a result.
    GameEnded {
        /// Game epoch.
        epoch: u64,
        /// Final outcome.
        result: GameResult,
        /// Event metadata.
        metadata: EventMetadata,
    },
    /// An agent call failed; the game was discarded and the UI returns to setup.
    GameAborted {
        /// Game epoch.
        epoch: u64,
        /// What went wrong.
        notice: AbortNotice,
        /// Event metadata.
        metadata: EventMetadata,
    },
    /// The player went back to setup.
    GameReset {
        /// Epoch that is now current.
        epoch: u64,
        /// Event metadata.
        metadata: EventMetadata,
    },
    /// The player reopened the conversation of a finished game.
    ReviewOpened {
        /// Game epoch.
        epoch: u64,
        /// Event metadata.
        metadata: EventMetadata,
    },
}

impl GameEvent {
    /// Epoch of the game the event belongs to.
    #[must_use]
    pub fn epoch(&self) -> u64 {
        match self {
            Self::GameStarted { epoch, .. }
            | Self::AgentTurnStarted { epoch, .. }
            | Self::AgentTurnCompleted { epoch, .. }
            | Self::GameEnded { epoch, .. }
            | Self::GameAborted { epoch, .. }
            | Self::GameReset { epoch, .. }
            | Self::ReviewOpened { epoch, .. } => *epoch,
        }
    }

    /// Whether no further events follow for this epoch.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::GameEnded { .. } | Self::GameAborted { .. } | Self::GameReset { .. }
        )
    }
}
