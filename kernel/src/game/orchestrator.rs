//! The turn-taking loop.
//!
//! Each round asks Helper 1 for a clue, lets the Oracle guess, and, if that
//! guess misses, does the same with Helper 2. The game ends on the first
//! matching guess or after the last allowed round.

use metrics::{counter, histogram};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

use crate::agents::{AgentCapability, AgentError};
use crate::game::board::GameRecorder;
use crate::game::error::GameError;
use crate::game::events::AbortNotice;
use crate::game::history::History;
use crate::game::types::{AgentRole, GameResult, Helper, MAX_ROUNDS, Message, TurnPhase};
use crate::game::words::{SecretWord, clean_clue, clean_guess};

const DEFAULT_TURN_DELAY: Duration = Duration::from_millis(800);
const DEFAULT_ROUND_DELAY: Duration = Duration::from_millis(1500);
const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(60);

/// Presentation delays between turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Pause after each clue and after a missed first guess.
    pub turn_delay: Duration,
    /// Pause before the next round starts.
    pub round_delay: Duration,
}

impl Pacing {
    /// No pauses at all.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            turn_delay: Duration::ZERO,
            round_delay: Duration::ZERO,
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            turn_delay: DEFAULT_TURN_DELAY,
            round_delay: DEFAULT_ROUND_DELAY,
        }
    }
}

/// Limits a game runs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameRules {
    /// Rounds played before the Oracle gives up. At most [`MAX_ROUNDS`].
    pub max_rounds: u32,
    /// Deadline for a single agent call.
    pub call_timeout: Duration,
    /// Delays between turns.
    pub pacing: Pacing,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            max_rounds: MAX_ROUNDS,
            call_timeout: DEFAULT_CALL_TIMEOUT,
            pacing: Pacing::default(),
        }
    }
}

/// Runs games against an [`AgentCapability`].
pub struct Orchestrator {
    agents: Arc<dyn AgentCapability>,
    rules: GameRules,
}

impl Orchestrator {
    /// Creates an orchestrator. `max_rounds` is clamped to `1..=MAX_ROUNDS`.
    #[must_use]
    pub fn new(agents: Arc<dyn AgentCapability>, mut rules: GameRules) -> Self {
        rules.max_rounds = rules.max_rounds.clamp(1, MAX_ROUNDS);
        Self { agents, rules }
    }

    /// The rules in force.
    #[must_use]
    pub fn rules(&self) -> GameRules {
        self.rules
    }

    /// Plays one game to the end, writing every turn through `recorder`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Capability`] after an agent call failed or timed
    /// out (the game has been aborted on the board by then), or
    /// [`GameError::Superseded`] once a newer game or a reset took over.
    #[instrument(skip_all, fields(epoch = recorder.epoch()))]
    pub async fn run(
        &self,
        secret_word: &SecretWord,
        recorder: &GameRecorder,
    ) -> Result<GameResult, GameError> {
        let mut history = History::new();
        let mut round = 1;

        loop {
            debug!(round, "Round started");

            self.clue_turn(Helper::First, secret_word, &mut history, round, recorder)
                .await?;
            pause(self.rules.pacing.turn_delay).await;

            let guess = self
                .guess_turn(Helper::First, &mut history, round, recorder)
                .await?;
            if secret_word.is_matched_by(&guess) {
                return self.conclude(recorder, GameResult::solved(guess), round);
            }
            pause(self.rules.pacing.turn_delay).await;

            self.clue_turn(Helper::Second, secret_word, &mut history, round, recorder)
                .await?;
            pause(self.rules.pacing.turn_delay).await;

            let guess = self
                .guess_turn(Helper::Second, &mut history, round, recorder)
                .await?;
            if secret_word.is_matched_by(&guess) {
                return self.conclude(recorder, GameResult::solved(guess), round);
            }

            round += 1;
            if round > self.rules.max_rounds {
                return self.conclude(recorder, GameResult::gave_up(), round - 1);
            }
            pause(self.rules.pacing.round_delay).await;
        }
    }

    async fn clue_turn(
        &self,
        helper: Helper,
        secret_word: &SecretWord,
        history: &mut History,
        round: u32,
        recorder: &GameRecorder,
    ) -> Result<(), GameError> {
        let role = AgentRole::from(helper);
        recorder.turn_started(TurnPhase::clue(helper), round)?;

        let reply = self
            .call(
                role,
                self.agents
                    .helper_clue(helper, secret_word.as_str(), history.entries(), round),
            )
            .await;
        let clue = match reply {
            Ok(raw) => clean_clue(&raw),
            Err(source) => return Err(Self::fail(recorder, role, source)),
        };

        debug!(agent = role.as_str(), round, %clue, "Clue received");
        let entry = history.push_clue(helper, &clue);
        recorder.turn_completed(round, entry, Message::clue(helper, round, &clue))
    }

    async fn guess_turn(
        &self,
        after: Helper,
        history: &mut History,
        round: u32,
        recorder: &GameRecorder,
    ) -> Result<String, GameError> {
        let role = AgentRole::Guesser;
        recorder.turn_started(TurnPhase::guess_after(after), round)?;

        let reply = self
            .call(role, self.agents.guesser_guess(history.entries()))
            .await;
        let guess = match reply {
            Ok(raw) => clean_guess(&raw),
            Err(source) => return Err(Self::fail(recorder, role, source)),
        };

        debug!(round, %guess, "Guess received");
        let entry = history.push_guess(&guess);
        recorder.turn_completed(round, entry, Message::guess(after, round, &guess))?;
        Ok(guess)
    }

    async fn call<F>(&self, role: AgentRole, reply: F) -> Result<String, AgentError>
    where
        F: Future<Output = Result<String, AgentError>>,
    {
        let started = Instant::now();
        let outcome = tokio::time::timeout(self.rules.call_timeout, reply)
            .await
            .unwrap_or(Err(AgentError::Timeout(self.rules.call_timeout)));

        histogram!("mindgames_agent_call_duration_seconds", "role" => role.as_str())
            .record(started.elapsed().as_secs_f64());
        let status = if outcome.is_ok() { "ok" } else { "error" };
        counter!("mindgames_agent_calls_total", "role" => role.as_str(), "status" => status)
            .increment(1);
        outcome
    }

    fn fail(recorder: &GameRecorder, role: AgentRole, source: AgentError) -> GameError {
        warn!(agent = role.as_str(), error = %source, "Agent call failed, aborting game");
        if let Err(superseded) = recorder.abort(AbortNotice::new(role, &source)) {
            return superseded;
        }
        counter!("mindgames_games_aborted_total", "role" => role.as_str()).increment(1);
        GameError::Capability { role, source }
    }

    fn conclude(
        &self,
        recorder: &GameRecorder,
        result: GameResult,
        round: u32,
    ) -> Result<GameResult, GameError> {
        recorder.finish(result.clone())?;
        let outcome = if result.is_correct { "won" } else { "lost" };
        counter!("mindgames_games_finished_total", "outcome" => outcome).increment(1);
        info!(
            round,
            outcome,
            final_guess = %result.final_guess,
            max_rounds = self.rules.max_rounds,
            "Game finished"
        );
        Ok(result)
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct Silent;

    #[async_trait]
    impl AgentCapability for Silent {
        async fn helper_clue(
            &self,
            _helper: Helper,
            _secret_word: &str,
            _history: &[String],
            _round: u32,
        ) -> Result<String, AgentError> {
            Ok(String::new())
        }

        async fn guesser_guess(&self, _history: &[String]) -> Result<String, AgentError> {
            Ok(String::new())
        }
    }

    #[test]
    fn max_rounds_is_clamped() {
        let rules = GameRules {
            max_rounds: 50,
            ..GameRules::default()
        };
        assert_eq!(Orchestrator::new(Arc::new(Silent), rules).rules().max_rounds, 10);

        let rules = GameRules {
            max_rounds: 0,
            ..GameRules::default()
        };
        assert_eq!(Orchestrator::new(Arc::new(Silent), rules).rules().max_rounds, 1);
    }

    #[test]
    fn default_pacing_matches_presentation_timing() {
        let pacing = Pacing::default();
        assert_eq!(pacing.turn_delay, Duration::from_millis(800));
        assert_eq!(pacing.round_delay, Duration::from_millis(1500));
        assert!(Pacing::none().turn_delay.is_zero());
    }
}
