//! Game orchestration: the session state, the round loop and the service
//! that drives it.

pub mod board;
pub mod error;
pub mod events;
pub mod history;
pub mod orchestrator;
pub mod service;
pub mod types;
pub mod words;

pub use board::{GameBoard, GameRecorder, GameSnapshot};
pub use error::GameError;
pub use events::{ABORT_HINT, AbortNotice, EventMetadata, GameEvent};
pub use history::History;
pub use orchestrator::{GameRules, Orchestrator, Pacing};
pub use service::GameService;
pub use types::{AgentRole, GameResult, GameState, Helper, MAX_ROUNDS, Message, TurnPhase};
pub use words::{SecretWord, clean_clue, clean_guess, is_match};
