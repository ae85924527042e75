//! Round bound, pacing and deadlines of a game.

use serde::Deserialize;
use std::time::Duration;

use crate::game::{GameRules, Pacing};

/// Game loop settings.
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct GameSettings {
    /// Rounds before the Oracle gives up, 1 to 10.
    pub max_rounds: u32,
    /// Pause after clues and after a missed first guess.
    pub turn_delay_ms: u64,
    /// Pause between rounds.
    pub round_delay_ms: u64,
    /// Deadline for one agent call.
    pub call_timeout_ms: u64,
}

impl From<&GameSettings> for GameRules {
    fn from(settings: &GameSettings) -> Self {
        Self {
            max_rounds: settings.max_rounds,
            call_timeout: Duration::from_millis(settings.call_timeout_ms),
            pacing: Pacing {
                turn_delay: Duration::from_millis(settings.turn_delay_ms),
                round_delay: Duration::from_millis(settings.round_delay_ms),
            },
        }
    }
}
