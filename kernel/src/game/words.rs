//! Word handling: secret word validation, cleanup of agent output and the
//! lenient match rule.

use serde::Serialize;
use std::fmt;

const STRIPPED_PUNCTUATION: [char; 3] = ['.', ',', '!'];

/// A trimmed, non-empty secret word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SecretWord(String);

impl SecretWord {
    /// Trims `raw`; returns `None` when nothing is left.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// The word as entered, minus surrounding whitespace.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Applies [`is_match`] against this word.
    #[must_use]
    pub fn is_matched_by(&self, guess: &str) -> bool {
        is_match(guess, &self.0)
    }
}

impl fmt::Display for SecretWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn strip_punctuation(text: &str) -> String {
    text.chars()
        .filter(|c| !STRIPPED_PUNCTUATION.contains(c))
        .collect()
}

/// Normalises a helper's raw reply: trimmed, then `.`, `,` and `!` removed.
///
/// Whitespace uncovered by the stripping stays, so `"Wow !"` becomes `"Wow "`.
#[must_use]
pub fn clean_clue(raw: &str) -> String {
    strip_punctuation(raw.trim())
}

/// Normalises the Oracle's raw reply: trimmed, lowercased, then `.`, `,` and
/// `!` removed.
#[must_use]
pub fn clean_guess(raw: &str) -> String {
    strip_punctuation(&raw.trim().to_lowercase())
}

/// Case-insensitive lenient match: equal, or either word contains the other.
///
/// "space" matches "spaceship" and vice versa. Short guesses can therefore
/// match unrelated longer words. An empty word on either side never matches.
#[must_use]
pub fn is_match(guess: &str, secret: &str) -> bool {
    let guess = guess.to_lowercase();
    let secret = secret.to_lowercase();
    if guess.is_empty() || secret.is_empty() {
        return false;
    }
    guess == secret || guess.contains(&secret) || secret.contains(&guess)
}
