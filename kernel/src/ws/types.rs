//! Frame and error types for the game WebSocket.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

use crate::game::{GameEvent, GameSnapshot};

/// Unique identifier for a WebSocket client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientId(Uuid);

impl ClientId {
    /// Generates a new unique client ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What the broadcaster fans out to every connection.
#[derive(Debug, Clone)]
pub enum BroadcastMessage {
    /// An orchestration event.
    Game(Box<GameEvent>),
    /// The kernel is going down.
    Shutdown,
}

impl BroadcastMessage {
    /// Converts the message to a WebSocket text payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the event cannot be serialized to JSON.
    pub fn to_frame_payload(&self) -> Result<String, WsError> {
        match self {
            Self::Game(event) => serde_json::to_string(event).map_err(WsError::Serialization),
            Self::Shutdown => Ok(r#"{"type":"shutdown"}"#.to_string()),
        }
    }
}

impl From<GameEvent> for BroadcastMessage {
    fn from(event: GameEvent) -> Self {
        Self::Game(Box::new(event))
    }
}

/// Commands a browser may send over the socket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientCommand {
    /// Start a new game with this secret word.
    StartGame {
        /// The word the helpers describe.
        secret_word: String,
    },
    /// Return to setup.
    Reset,
    /// Reopen the conversation of a finished game.
    Review,
}

/// Frames sent to a single client outside the broadcast stream.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DirectFrame {
    /// Full state, sent on connect and after lagging.
    Snapshot {
        /// Current state.
        snapshot: GameSnapshot,
    },
    /// A client command could not be handled.
    Error {
        /// What went wrong.
        message: String,
    },
}

impl DirectFrame {
    /// Serializes the frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame cannot be serialized to JSON.
    pub fn to_payload(&self) -> Result<String, WsError> {
        serde_json::to_string(self).map_err(WsError::Serialization)
    }
}

/// WebSocket errors.
#[derive(Debug, Error)]
pub enum WsError {
    /// Socket I/O failed.
    #[error("WebSocket connection error: {0}")]
    AxumWs(#[from] axum::Error),

    /// A frame could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The broadcaster was dropped.
    #[error("Broadcast channel closed")]
    ChannelClosed,

    /// The receiver fell behind and missed events.
    #[error("Receiver lagged by {0} messages")]
    Lagged(u64),
}
