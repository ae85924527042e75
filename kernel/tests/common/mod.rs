//! Scripted agents and helpers shared by the game tests.

#![allow(dead_code)]

use async_trait::async_trait;
use mindgames_kernel::agents::{AgentCapability, AgentError};
use mindgames_kernel::game::{AgentRole, GameEvent, GameRules, Helper, Pacing};
use mindgames_kernel::ws::{BroadcastMessage, BroadcastReceiver};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

type ClueFn = dyn Fn(Helper, &str, u32) -> Result<String, AgentError> + Send + Sync;
type GuessFn = dyn Fn(usize) -> Result<String, AgentError> + Send + Sync;

/// One recorded capability invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub role: AgentRole,
    pub secret_word: Option<String>,
    pub round: Option<u32>,
    pub history: Vec<String>,
}

/// Agents whose replies come from closures; every call is recorded.
pub struct ScriptedAgents {
    clue: Box<ClueFn>,
    guess: Box<GuessFn>,
    stall: Option<(Helper, String)>,
    stalled: Arc<Notify>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedAgents {
    pub fn new(
        clue: impl Fn(Helper, &str, u32) -> Result<String, AgentError> + Send + Sync + 'static,
        guess: impl Fn(usize) -> Result<String, AgentError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            clue: Box::new(clue),
            guess: Box::new(guess),
            stall: None,
            stalled: Arc::new(Notify::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Helpers always say `clue`, the Oracle always says `guess`.
    pub fn constant(clue: &str, guess: &str) -> Self {
        let clue = clue.to_string();
        let guess = guess.to_string();
        Self::new(move |_, _, _| Ok(clue.clone()), move |_| Ok(guess.clone()))
    }

    /// `helper` never answers while the secret word is `secret_word`.
    pub fn stall_on(mut self, helper: Helper, secret_word: &str) -> Self {
        self.stall = Some((helper, secret_word.to_string()));
        self
    }

    /// Notified when a stalled call has been entered.
    pub fn stalled(&self) -> Arc<Notify> {
        Arc::clone(&self.stalled)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn count(&self, role: AgentRole) -> usize {
        self.calls.lock().iter().filter(|c| c.role == role).count()
    }

    pub fn helper_count(&self) -> usize {
        self.count(AgentRole::Helper1) + self.count(AgentRole::Helper2)
    }
}

#[async_trait]
impl AgentCapability for ScriptedAgents {
    async fn helper_clue(
        &self,
        helper: Helper,
        secret_word: &str,
        history: &[String],
        round: u32,
    ) -> Result<String, AgentError> {
        self.calls.lock().push(Call {
            role: AgentRole::from(helper),
            secret_word: Some(secret_word.to_string()),
            round: Some(round),
            history: history.to_vec(),
        });
        if let Some((stalled_helper, word)) = &self.stall {
            if *stalled_helper == helper && word == secret_word {
                self.stalled.notify_one();
                std::future::pending::<()>().await;
            }
        }
        (self.clue)(helper, secret_word, round)
    }

    async fn guesser_guess(&self, history: &[String]) -> Result<String, AgentError> {
        let index = {
            let mut calls = self.calls.lock();
            calls.push(Call {
                role: AgentRole::Guesser,
                secret_word: None,
                round: None,
                history: history.to_vec(),
            });
            calls.iter().filter(|c| c.role == AgentRole::Guesser).count() - 1
        };
        (self.guess)(index)
    }
}

/// No pacing, generous deadline.
pub fn quick_rules(max_rounds: u32) -> GameRules {
    GameRules {
        max_rounds,
        call_timeout: Duration::from_secs(5),
        pacing: Pacing::none(),
    }
}

/// Next game event, failing the test after a few seconds of silence.
pub async fn next_event(rx: &mut BroadcastReceiver) -> GameEvent {
    let msg = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("no event within 5s")
        .expect("broadcast receive failed");
    match msg {
        BroadcastMessage::Game(event) => *event,
        BroadcastMessage::Shutdown => panic!("unexpected shutdown"),
    }
}

/// Collects events up to and including the terminal event of `epoch`.
pub async fn events_until_end(rx: &mut BroadcastReceiver, epoch: u64) -> Vec<GameEvent> {
    let mut events = Vec::new();
    loop {
        let event = next_event(rx).await;
        let done = event.epoch() == epoch && event.is_terminal();
        events.push(event);
        if done {
            return events;
        }
    }
}
