//! Domain types for a single game: states, roles, turn phases, messages and
//! results.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Hard bound on the number of rounds before the Oracle gives up.
pub const MAX_ROUNDS: u32 = 10;

/// Final guess recorded when the round bound is exhausted.
pub const GIVE_UP_GUESS: &str = "Giving up...";

/// UI-facing phase of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameState {
    /// Waiting for a secret word.
    #[default]
    Setup,
    /// Agents are taking turns.
    Playing,
    /// The game is over and a result is available.
    Result,
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Setup => write!(f, "setup"),
            Self::Playing => write!(f, "playing"),
            Self::Result => write!(f, "result"),
        }
    }
}

/// One of the two clue-giving seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Helper {
    /// Speaks first in every round.
    First,
    /// Speaks after the Oracle's first guess of the round.
    Second,
}

impl Helper {
    /// Position of the helper in the round, 1 or 2.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::First => 1,
            Self::Second => 2,
        }
    }
}

/// Any agent taking part in a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentRole {
    /// First clue giver ("Helper Alpha").
    Helper1,
    /// Second clue giver ("Helper Beta").
    Helper2,
    /// The guesser ("The Oracle").
    Guesser,
}

impl AgentRole {
    /// Display name shown next to the agent's bubble.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Helper1 => "Helper Alpha",
            Self::Helper2 => "Helper Beta",
            Self::Guesser => "The Oracle",
        }
    }

    /// Stable label for logs and metrics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Helper1 => "helper1",
            Self::Helper2 => "helper2",
            Self::Guesser => "guesser",
        }
    }
}

impl From<Helper> for AgentRole {
    fn from(helper: Helper) -> Self {
        match helper {
            Helper::First => Self::Helper1,
            Helper::Second => Self::Helper2,
        }
    }
}

impl fmt::Display for AgentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Sub-phase of a round while the game is `Playing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnPhase {
    /// Helper 1 is writing a clue.
    Helper1,
    /// The Oracle answers Helper 1.
    FirstGuess,
    /// Helper 2 is writing a clue.
    Helper2,
    /// The Oracle answers Helper 2.
    SecondGuess,
}

impl TurnPhase {
    /// Phase in which `helper` gives its clue.
    #[must_use]
    pub const fn clue(helper: Helper) -> Self {
        match helper {
            Helper::First => Self::Helper1,
            Helper::Second => Self::Helper2,
        }
    }

    /// Phase in which the Oracle answers `helper`'s clue.
    #[must_use]
    pub const fn guess_after(helper: Helper) -> Self {
        match helper {
            Helper::First => Self::FirstGuess,
            Helper::Second => Self::SecondGuess,
        }
    }

    /// The agent active during this phase.
    #[must_use]
    pub const fn agent(self) -> AgentRole {
        match self {
            Self::Helper1 => AgentRole::Helper1,
            Self::Helper2 => AgentRole::Helper2,
            Self::FirstGuess | Self::SecondGuess => AgentRole::Guesser,
        }
    }
}

/// A finished agent turn as rendered in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Bubble header, e.g. `Helper Alpha (Rnd 2)` or `The Oracle (Rnd 2.1)`.
    pub agent_label: String,
    /// Bubble body.
    pub text: String,
    /// Which agent spoke.
    pub role: AgentRole,
}

impl Message {
    /// Message for a helper's clue in `round`.
    #[must_use]
    pub fn clue(helper: Helper, round: u32, clue: &str) -> Self {
        let role = AgentRole::from(helper);
        Self {
            agent_label: format!("{} (Rnd {round})", role.display_name()),
            text: clue.to_string(),
            role,
        }
    }

    /// Message for the Oracle's answer to `helper` in `round`.
    #[must_use]
    pub fn guess(helper: Helper, round: u32, guess: &str) -> Self {
        Self {
            agent_label: format!(
                "{} (Rnd {round}.{})",
                AgentRole::Guesser.display_name(),
                helper.number()
            ),
            text: format!("Guess: {}", guess.to_uppercase()),
            role: AgentRole::Guesser,
        }
    }
}

/// Outcome of a finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    /// The matching guess, or [`GIVE_UP_GUESS`].
    pub final_guess: String,
    /// Whether the Oracle found the word.
    pub is_correct: bool,
}

impl GameResult {
    /// The Oracle guessed the word.
    #[must_use]
    pub fn solved(guess: impl Into<String>) -> Self {
        Self {
            final_guess: guess.into(),
            is_correct: true,
        }
    }

    /// The round bound ran out.
    #[must_use]
    pub fn gave_up() -> Self {
        Self {
            final_guess: GIVE_UP_GUESS.to_string(),
            is_correct: false,
        }
    }
}
