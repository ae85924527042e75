//! The single owned game state and the epoch-guarded handle a running game
//! writes through.
//!
//! Every mutation takes the state lock, compares the caller's epoch with the
//! current one, applies the change and publishes the matching event before
//! the lock is released. A loop whose epoch was bumped by a newer game or a
//! reset gets [`GameError::Superseded`] and can no longer touch anything.

use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

use crate::game::error::GameError;
use crate::game::events::{AbortNotice, EventMetadata, GameEvent};
use crate::game::types::{AgentRole, GameResult, GameState, Message, TurnPhase};
use crate::game::words::SecretWord;
use crate::ws::{BroadcastReceiver, Broadcaster};

#[derive(Debug, Default)]
struct SessionState {
    epoch: u64,
    state: GameState,
    reviewing: bool,
    secret_word: Option<SecretWord>,
    round: u32,
    phase: Option<TurnPhase>,
    history: Vec<String>,
    messages: Vec<Message>,
    current_agent: Option<AgentRole>,
    result: Option<GameResult>,
    last_error: Option<AbortNotice>,
}

impl SessionState {
    fn clear_game(&mut self) {
        self.reviewing = false;
        self.round = 0;
        self.phase = None;
        self.history.clear();
        self.messages.clear();
        self.current_agent = None;
        self.result = None;
    }
}

/// Read-only copy of the session for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    /// Current epoch.
    pub epoch: u64,
    /// Game phase.
    pub state: GameState,
    /// Screen to show; the conversation view while reviewing a finished game.
    pub view: GameState,
    /// Secret word of the current or last game.
    pub secret_word: Option<SecretWord>,
    /// Current round, 0 before the first turn.
    pub round: u32,
    /// Active sub-phase while playing.
    pub phase: Option<TurnPhase>,
    /// Shared clue/guess log.
    pub history: Vec<String>,
    /// Conversation bubbles.
    pub messages: Vec<Message>,
    /// Agent currently thinking.
    pub current_agent: Option<AgentRole>,
    /// Outcome once the game is over.
    pub result: Option<GameResult>,
    /// Why the last game was aborted, if it was.
    pub last_error: Option<AbortNotice>,
}

impl From<&SessionState> for GameSnapshot {
    fn from(s: &SessionState) -> Self {
        let view = if s.reviewing {
            GameState::Playing
        } else {
            s.state
        };
        Self {
            epoch: s.epoch,
            state: s.state,
            view,
            secret_word: s.secret_word.clone(),
            round: s.round,
            phase: s.phase,
            history: s.history.clone(),
            messages: s.messages.clone(),
            current_agent: s.current_agent,
            result: s.result.clone(),
            last_error: s.last_error.clone(),
        }
    }
}

/// Shared owner of the session state.
#[derive(Clone, Default)]
pub struct GameBoard {
    inner: Arc<Mutex<SessionState>>,
    broadcaster: Broadcaster,
}

impl GameBoard {
    /// A board in `Setup` at epoch 0 publishing through `broadcaster`.
    #[must_use]
    pub fn new(broadcaster: Broadcaster) -> Self {
        Self {
            inner: Arc::default(),
            broadcaster,
        }
    }

    /// The broadcaster events are published on.
    #[must_use]
    pub fn broadcaster(&self) -> &Broadcaster {
        &self.broadcaster
    }

    /// Starts a new game, superseding whatever ran before.
    pub fn begin(&self, secret_word: SecretWord, max_rounds: u32) -> GameRecorder {
        let mut s = self.inner.lock();
        s.epoch += 1;
        s.clear_game();
        s.state = GameState::Playing;
        s.secret_word = Some(secret_word);
        s.last_error = None;
        let epoch = s.epoch;
        info!(epoch, "Game started");
        self.broadcaster.broadcast(GameEvent::GameStarted {
            epoch,
            max_rounds,
            metadata: EventMetadata::new(),
        });
        GameRecorder {
            board: self.clone(),
            epoch,
        }
    }

    /// Discards the current game and returns to `Setup`.
    pub fn reset(&self) -> GameSnapshot {
        let mut s = self.inner.lock();
        s.epoch += 1;
        s.clear_game();
        s.state = GameState::Setup;
        s.secret_word = None;
        s.last_error = None;
        info!(epoch = s.epoch, "Game reset");
        self.broadcaster.broadcast(GameEvent::GameReset {
            epoch: s.epoch,
            metadata: EventMetadata::new(),
        });
        GameSnapshot::from(&*s)
    }

    /// Shows the conversation of a finished game again.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidTransition`] unless the game is in `Result`.
    pub fn review(&self) -> Result<GameSnapshot, GameError> {
        let mut s = self.inner.lock();
        if s.state != GameState::Result {
            return Err(GameError::InvalidTransition {
                from: s.state,
                to: GameState::Playing,
            });
        }
        s.reviewing = true;
        self.broadcaster.broadcast(GameEvent::ReviewOpened {
            epoch: s.epoch,
            metadata: EventMetadata::new(),
        });
        Ok(GameSnapshot::from(&*s))
    }

    /// Copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::from(&*self.inner.lock())
    }

    /// Copies the state and subscribes under the same lock. The receiver
    /// yields exactly the events published after the snapshot.
    #[must_use]
    pub fn attach(&self) -> (GameSnapshot, BroadcastReceiver) {
        let s = self.inner.lock();
        let receiver = self.broadcaster.subscribe();
        (GameSnapshot::from(&*s), receiver)
    }
}

/// Write handle held by the loop of one game.
#[derive(Clone)]
pub struct GameRecorder {
    board: GameBoard,
    epoch: u64,
}

impl GameRecorder {
    /// The epoch this recorder writes for.
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    fn apply(&self, f: impl FnOnce(&mut SessionState) -> GameEvent) -> Result<(), GameError> {
        let mut s = self.board.inner.lock();
        if s.epoch != self.epoch {
            debug!(epoch = self.epoch, current = s.epoch, "Dropping stale update");
            return Err(GameError::Superseded { epoch: self.epoch });
        }
        let event = f(&mut s);
        self.board.broadcaster.broadcast(event);
        Ok(())
    }

    /// Marks `phase` of `round` as in progress.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Superseded`] if a newer game took over.
    pub fn turn_started(&self, phase: TurnPhase, round: u32) -> Result<(), GameError> {
        let epoch = self.epoch;
        self.apply(|s| {
            s.round = round;
            s.phase = Some(phase);
            s.current_agent = Some(phase.agent());
            GameEvent::AgentTurnStarted {
                epoch,
                agent: phase.agent(),
                round,
                phase,
                metadata: EventMetadata::new(),
            }
        })
    }

    /// Records a finished turn: one history entry and one message.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Superseded`] if a newer game took over.
    pub fn turn_completed(&self, round: u32, entry: &str, message: Message) -> Result<(), GameError> {
        let epoch = self.epoch;
        self.apply(|s| {
            s.history.push(entry.to_string());
            s.messages.push(message.clone());
            s.current_agent = None;
            GameEvent::AgentTurnCompleted {
                epoch,
                agent: message.role,
                round,
                message,
                entry: entry.to_string(),
                history_len: s.history.len(),
                metadata: EventMetadata::new(),
            }
        })
    }

    /// Moves to `Result` with `result`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Superseded`] if a newer game took over.
    pub fn finish(&self, result: GameResult) -> Result<(), GameError> {
        let epoch = self.epoch;
        self.apply(|s| {
            s.state = GameState::Result;
            s.phase = None;
            s.current_agent = None;
            s.result = Some(result.clone());
            GameEvent::GameEnded {
                epoch,
                result,
                metadata: EventMetadata::new(),
            }
        })
    }

    /// Discards the partial game and returns to `Setup` with `notice` shown.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Superseded`] if a newer game took over.
    pub fn abort(&self, notice: AbortNotice) -> Result<(), GameError> {
        let epoch = self.epoch;
        self.apply(|s| {
            s.clear_game();
            s.state = GameState::Setup;
            s.last_error = Some(notice.clone());
            GameEvent::GameAborted {
                epoch,
                notice,
                metadata: EventMetadata::new(),
            }
        })
    }
}
