//! Owner of the session: starts, supersedes, resets and reviews games.

use metrics::counter;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::agents::AgentCapability;
use crate::game::board::{GameBoard, GameSnapshot};
use crate::game::error::GameError;
use crate::game::orchestrator::{GameRules, Orchestrator};
use crate::game::words::SecretWord;
use crate::ws::{BroadcastReceiver, Broadcaster};

/// Runs at most one game at a time and answers player commands.
pub struct GameService {
    orchestrator: Arc<Orchestrator>,
    board: GameBoard,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl GameService {
    /// Creates a service in `Setup` that publishes on `broadcaster`.
    #[must_use]
    pub fn new(
        agents: Arc<dyn AgentCapability>,
        rules: GameRules,
        broadcaster: Broadcaster,
    ) -> Self {
        Self {
            orchestrator: Arc::new(Orchestrator::new(agents, rules)),
            board: GameBoard::new(broadcaster),
            task: Mutex::new(None),
        }
    }

    /// Starts a game for `secret_word` and returns its epoch.
    ///
    /// Blank input is ignored and yields `None`. Any game still running is
    /// superseded and its task aborted. Must be called inside a tokio runtime.
    pub fn start_game(&self, secret_word: &str) -> Option<u64> {
        let Some(secret_word) = SecretWord::parse(secret_word) else {
            debug!("Ignoring blank secret word");
            return None;
        };

        let mut task = self.task.lock();
        let recorder = self
            .board
            .begin(secret_word.clone(), self.orchestrator.rules().max_rounds);
        if let Some(previous) = task.take() {
            previous.abort();
        }
        counter!("mindgames_games_started_total").increment(1);

        let epoch = recorder.epoch();
        let orchestrator = Arc::clone(&self.orchestrator);
        *task = Some(tokio::spawn(async move {
            match orchestrator.run(&secret_word, &recorder).await {
                Ok(result) => debug!(epoch, is_correct = result.is_correct, "Game loop done"),
                Err(e) if e.is_superseded() => debug!(epoch, "Game loop superseded"),
                Err(e) => warn!(epoch, error = %e, "Game aborted"),
            }
        }));

        info!(epoch, "Game scheduled");
        Some(epoch)
    }

    /// Stops any running game and returns to `Setup`.
    pub fn reset(&self) -> GameSnapshot {
        let mut task = self.task.lock();
        let snapshot = self.board.reset();
        if let Some(previous) = task.take() {
            previous.abort();
        }
        snapshot
    }

    /// Switches a finished game back to the conversation view.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidTransition`] unless the game is in `Result`.
    pub fn review(&self) -> Result<GameSnapshot, GameError> {
        self.board.review()
    }

    /// Copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        self.board.snapshot()
    }

    /// Snapshot plus a receiver for the events that follow it, with no gap
    /// and no overlap between the two.
    #[must_use]
    pub fn attach(&self) -> (GameSnapshot, BroadcastReceiver) {
        self.board.attach()
    }

    /// Receiver for every event published from now on.
    #[must_use]
    pub fn subscribe(&self) -> BroadcastReceiver {
        self.board.broadcaster().subscribe()
    }

    /// The broadcaster events go out on.
    #[must_use]
    pub fn broadcaster(&self) -> &Broadcaster {
        self.board.broadcaster()
    }
}

impl Drop for GameService {
    fn drop(&mut self) {
        if let Some(task) = self.task.get_mut().take() {
            task.abort();
        }
    }
}
