//! Prompt text for the helper and guesser roles.

use crate::game::types::Helper;

fn difficulty(helper: Helper, round: u32) -> &'static str {
    match (round, helper) {
        (0 | 1, Helper::First) => {
            "BE EXTREMELY VAGUE. Give a very broad, high-level or abstract one-word clue \
             that is only loosely related."
        }
        (0 | 1, Helper::Second) => {
            "BE EXTREMELY VAGUE. Give a one-word clue from a different angle than Helper 1, \
             but keep it very abstract."
        }
        (2, _) => "Be subtle, but a little more focused than in Round 1.",
        _ => "You may be more specific now.",
    }
}

fn goal(helper: Helper) -> &'static str {
    match helper {
        Helper::First => {
            "Your goal is to give a ONE-WORD clue to a third agent so they can guess the word."
        }
        Helper::Second => {
            "Your goal is to give a complementary ONE-WORD clue that helps the guesser."
        }
    }
}

/// Prompt for `helper` in `round`.
#[must_use]
pub fn helper_prompt(helper: Helper, secret_word: &str, history: &[String], round: u32) -> String {
    let previous = if history.is_empty() {
        "None".to_string()
    } else {
        history.join(", ")
    };

    format!(
        "You are \"Helper Agent {number}\". The secret word is \"{secret_word}\".\n\
         Current Round: {round}.\n\
         {difficulty}\n\
         Previous clues and guesses: {previous}.\n\
         {goal}\n\
         Do NOT mention the secret word or any part of it.\n\
         Do NOT repeat any previous clues.\n\
         Respond ONLY with a single word.",
        number = helper.number(),
        difficulty = difficulty(helper, round),
        goal = goal(helper),
    )
}

/// Prompt for the Oracle.
#[must_use]
pub fn guesser_prompt(history: &[String]) -> String {
    format!(
        "You are \"The Guesser\". You have been given the following history of clues:\n\
         {}\n\
         Note: the first clues may be very abstract. Analyze the history carefully.\n\
         What is the secret word? Respond ONLY with your best guess (a single word).",
        history.join("\n")
    )
}
