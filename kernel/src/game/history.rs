//! The shared clue/guess log replayed to every agent.

use crate::game::types::Helper;

/// Ordered, append-only log of clues and guesses for one game.
///
/// Entries are never edited or reordered once pushed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    entries: Vec<String>,
}

impl History {
    /// An empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `Helper N Clue: {clue}` and returns the new entry.
    pub fn push_clue(&mut self, helper: Helper, clue: &str) -> &str {
        self.push(format!("Helper {} Clue: {clue}", helper.number()))
    }

    /// Appends `The Oracle Guess: {guess}` and returns the new entry.
    pub fn push_guess(&mut self, guess: &str) -> &str {
        self.push(format!("The Oracle Guess: {guess}"))
    }

    fn push(&mut self, entry: String) -> &str {
        self.entries.push(entry);
        self.entries.last().map_or("", String::as_str)
    }

    /// All entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was logged yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
