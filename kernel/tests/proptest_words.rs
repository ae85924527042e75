//! Property-based tests for the match rule and reply cleanup.
//!
//! Uses proptest to check that matching is symmetric and lenient about
//! substrings, and that cleaned replies are stable.

use mindgames_kernel::game::{clean_clue, clean_guess, is_match};
use proptest::prelude::*;

/// Strategy for generating single words, mixed case
fn word_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z]{1,12}"
}

/// Strategy for generating raw model replies with stray punctuation and padding
fn reply_strategy() -> impl Strategy<Value = String> {
    "[ \t]{0,3}[a-zA-Z.,! ]{0,16}[ \n]{0,3}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: Matching does not depend on argument order.
    #[test]
    fn match_is_symmetric(a in word_strategy(), b in word_strategy()) {
        prop_assert_eq!(is_match(&a, &b), is_match(&b, &a));
    }

    /// Property: Every non-empty word matches itself, in any case.
    #[test]
    fn match_is_reflexive(a in word_strategy()) {
        prop_assert!(is_match(&a, &a));
        prop_assert!(is_match(&a.to_uppercase(), &a.to_lowercase()));
    }

    /// Property: A word matches anything that contains it.
    #[test]
    fn substring_always_matches(
        prefix in "[a-z]{0,5}",
        core in word_strategy(),
        suffix in "[a-z]{0,5}",
    ) {
        let longer = format!("{prefix}{core}{suffix}");
        prop_assert!(is_match(&core, &longer));
        prop_assert!(is_match(&longer, &core));
    }

    /// Property: An empty word never matches.
    #[test]
    fn empty_never_matches(a in word_strategy()) {
        prop_assert!(!is_match("", &a));
        prop_assert!(!is_match(&a, ""));
    }

    /// Property: Cleaned guesses are lowercase and free of `.,!`.
    #[test]
    fn cleaned_guess_is_normalised(raw in reply_strategy()) {
        let guess = clean_guess(&raw);
        prop_assert_eq!(guess.clone(), guess.to_lowercase());
        prop_assert!(!guess.contains(['.', ',', '!']));
        prop_assert!(guess.len() <= raw.trim().len());
    }

    /// Property: Only the outer padding is trimmed; inner spaces survive.
    #[test]
    fn cleaning_keeps_inner_spacing(
        word in "[a-z]{1,8}",
        gap in "[ ]{1,3}",
        mark in "[.,!]{1,2}",
    ) {
        let raw = format!("  {word}{gap}{mark}\n");
        prop_assert_eq!(clean_guess(&raw), format!("{word}{gap}"));
        prop_assert_eq!(clean_clue(&raw), format!("{word}{gap}"));
    }

    /// Property: A clue keeps its case and otherwise agrees with the guess rule.
    #[test]
    fn cleaned_clue_matches_guess_up_to_case(raw in reply_strategy()) {
        let clue = clean_clue(&raw);
        prop_assert!(!clue.contains(['.', ',', '!']));
        prop_assert_eq!(clue.to_lowercase(), clean_guess(&raw));
    }
}

#[test]
fn substring_leniency_examples() {
    assert!(is_match("ship", "spaceship"));
    assert!(is_match("spaceship", "ship"));
    assert!(is_match("SPACE", "spaceship"));
    assert!(!is_match("rock", "xenon"));
}
