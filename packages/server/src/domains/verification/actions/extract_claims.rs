//! Sentence-level claim extraction.
//!
//! A plain regex boundary split, not a sentence tokenizer: abbreviations
//! and embedded punctuation get no special treatment.

use lazy_static::lazy_static;
use regex::Regex;

use crate::config::VerificationSettings;

/// Sentences starting with this (case-insensitive) report someone else's claim
const ATTRIBUTION_PREFIX: &str = "according";

lazy_static! {
    // Sentence-terminal punctuation followed by whitespace
    static ref SENTENCE_BOUNDARY: Regex = Regex::new(r"[.!?]\s+").unwrap();
}

/// Split text after `.`, `!` or `?` when followed by whitespace.
/// Punctuation stays with its sentence.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for boundary in SENTENCE_BOUNDARY.find_iter(text) {
        let end = boundary.start() + 1;
        sentences.push(&text[start..end]);
        start = boundary.end();
    }
    if start < text.len() {
        sentences.push(&text[start..]);
    }

    sentences
}

/// Whether a trimmed sentence is long enough and not attribution-prefixed
pub fn is_claim(sentence: &str, min_tokens: usize) -> bool {
    sentence.split_whitespace().count() > min_tokens
        && !sentence.to_lowercase().starts_with(ATTRIBUTION_PREFIX)
}

/// Extract candidate claims from raw text, in input order
pub fn extract_claims(text: &str, settings: &VerificationSettings) -> Vec<String> {
    split_sentences(text)
        .into_iter()
        .map(str::trim)
        .filter(|sentence| is_claim(sentence, settings.min_claim_tokens))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(text: &str) -> Vec<String> {
        extract_claims(text, &VerificationSettings::default())
    }

    #[test]
    fn test_split_keeps_punctuation() {
        let sentences = split_sentences("First one here. Second? Third!  Fourth");
        assert_eq!(sentences, vec!["First one here.", "Second?", "Third!", "Fourth"]);
    }

    #[test]
    fn test_split_ignores_punctuation_without_whitespace() {
        assert_eq!(
            split_sentences("Version 3.14 shipped.Then nothing"),
            vec!["Version 3.14 shipped.Then nothing"]
        );
    }

    #[test]
    fn test_short_sentence_is_not_a_claim() {
        assert!(claims("This is false.").is_empty());
    }

    #[test]
    fn test_exactly_min_tokens_is_not_a_claim() {
        // Five tokens; more than five are required
        assert!(claims("One two three four five.").is_empty());
        assert_eq!(claims("One two three four five six."), vec!["One two three four five six."]);
    }

    #[test]
    fn test_attribution_prefix_is_dropped() {
        let text = "Barack Obama was the 44th President of the United States. \
                    According to some reports, he was born on Mars.";
        assert_eq!(
            claims(text),
            vec!["Barack Obama was the 44th President of the United States."]
        );
    }

    #[test]
    fn test_attribution_prefix_is_case_insensitive() {
        assert!(claims("ACCORDING to the mayor the bridge will reopen next spring.").is_empty());
    }

    #[test]
    fn test_claims_are_trimmed_and_ordered() {
        let text = "  The Eiffel Tower is located in Paris, France.\n\nWater boils at one hundred degrees Celsius at sea level.  ";
        assert_eq!(
            claims(text),
            vec![
                "The Eiffel Tower is located in Paris, France.",
                "Water boils at one hundred degrees Celsius at sea level.",
            ]
        );
    }

    #[test]
    fn test_empty_text_has_no_claims() {
        assert!(claims("").is_empty());
        assert!(claims("   ").is_empty());
    }
}
