//! Search-query derivation for a claim.
//!
//! Entity-based first; when the claim names no organisation, place, product
//! or law, fall back to its non-stopword tokens.

use lazy_static::lazy_static;
use regex::Regex;

use crate::kernel::{EntityKind, NamedEntity};

const STOPWORDS: [&str; 10] = ["is", "was", "the", "in", "and", "at", "of", "from", "to", "on"];

/// Fallback tokens must be longer than this many characters
const MIN_TOKEN_CHARS: usize = 2;

lazy_static! {
    static ref WORD_REGEX: Regex = Regex::new(r"\b\w+\b").unwrap();
}

fn is_keyword_entity(kind: &EntityKind) -> bool {
    matches!(
        kind,
        EntityKind::Organization
            | EntityKind::GeopoliticalEntity
            | EntityKind::Product
            | EntityKind::Law
    )
}

/// Build a query from already-recognized entities (no model call)
pub fn keywords_from_entities(claim: &str, entities: &[NamedEntity], max_keywords: usize) -> String {
    let mut terms: Vec<&str> = entities
        .iter()
        .filter(|entity| is_keyword_entity(&entity.kind))
        .map(|entity| entity.text.as_str())
        .collect();

    if terms.is_empty() {
        terms = WORD_REGEX
            .find_iter(claim)
            .map(|m| m.as_str())
            .filter(|word| {
                !STOPWORDS.contains(&word.to_lowercase().as_str())
                    && word.chars().count() > MIN_TOKEN_CHARS
            })
            .collect();
    }

    terms
        .into_iter()
        .take(max_keywords)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entities_take_priority() {
        let entities = vec![
            NamedEntity::new("Barack Obama", EntityKind::Person),
            NamedEntity::new("the United States", EntityKind::GeopoliticalEntity),
            NamedEntity::new("Congress", EntityKind::Organization),
        ];

        let query = keywords_from_entities("irrelevant", &entities, 6);
        assert_eq!(query, "the United States Congress");
    }

    #[test]
    fn test_person_only_falls_back_to_tokens() {
        let entities = vec![NamedEntity::new("Marie Curie", EntityKind::Person)];
        let query = keywords_from_entities("Marie Curie won the Nobel Prize in 1903", &entities, 6);
        assert_eq!(query, "Marie Curie won Nobel Prize 1903");
    }

    #[test]
    fn test_fallback_drops_stopwords_and_short_tokens() {
        let query = keywords_from_entities("It is on the map of an old town", &[], 6);
        assert_eq!(query, "map old town");
    }

    #[test]
    fn test_stopwords_are_case_insensitive() {
        let query = keywords_from_entities("The Moon WAS FROM Earth", &[], 6);
        assert_eq!(query, "Moon Earth");
    }

    #[test]
    fn test_keywords_are_capped() {
        let query =
            keywords_from_entities("alpha bravo charlie delta echo foxtrot golf hotel", &[], 6);
        assert_eq!(query, "alpha bravo charlie delta echo foxtrot");
    }

    #[test]
    fn test_all_stopwords_yield_empty_query() {
        assert_eq!(keywords_from_entities("it is on to of", &[], 6), "");
    }
}
