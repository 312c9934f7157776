// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Verification rules (claims, relevance, verdicts) live in domains/verification
// and only talk to the outside world through these traits.
//
// Naming convention: Base* for trait names (e.g., BaseEncyclopedia, BaseEmbeddingService)

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// =============================================================================
// Named-Entity Recognition (Infrastructure)
// =============================================================================

/// Entity categories the pipeline cares about.
///
/// Model labels from both OntoNotes (PERSON, GPE, ...) and CoNLL (PER, LOC, ...)
/// vocabularies normalise into this set; anything else is `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Person,
    Organization,
    GeopoliticalEntity,
    Location,
    Product,
    Law,
    Other(String),
}

impl EntityKind {
    /// Normalise a raw model label ("B-PER", "gpe", "ORG", ...)
    pub fn from_label(label: &str) -> Self {
        let upper = label.trim().to_ascii_uppercase();
        let bare = upper
            .strip_prefix("B-")
            .or_else(|| upper.strip_prefix("I-"))
            .or_else(|| upper.strip_prefix("E-"))
            .or_else(|| upper.strip_prefix("S-"))
            .unwrap_or(&upper);

        match bare {
            "PERSON" | "PER" => EntityKind::Person,
            "ORG" | "ORGANIZATION" => EntityKind::Organization,
            "GPE" => EntityKind::GeopoliticalEntity,
            "LOC" | "LOCATION" => EntityKind::Location,
            "PRODUCT" => EntityKind::Product,
            "LAW" => EntityKind::Law,
            other => EntityKind::Other(other.to_string()),
        }
    }
}

/// One entity found in a piece of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedEntity {
    pub text: String,
    pub kind: EntityKind,
}

impl NamedEntity {
    pub fn new(text: impl Into<String>, kind: EntityKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }
}

#[async_trait]
pub trait BaseEntityRecognizer: Send + Sync {
    /// Recognize entities in text, in order of appearance
    async fn recognize(&self, text: &str) -> Result<Vec<NamedEntity>>;
}

// =============================================================================
// Embedding Service Trait (Infrastructure)
// =============================================================================

#[async_trait]
pub trait BaseEmbeddingService: Send + Sync {
    /// Generate a fixed-dimension sentence embedding for text
    async fn generate(&self, text: &str) -> Result<Vec<f32>>;
}

// =============================================================================
// Entailment Classifier Trait (Infrastructure - NLI)
// =============================================================================

/// A single class probability from the text-pair classifier
#[derive(Debug, Clone, PartialEq)]
pub struct EntailmentScore {
    /// Raw model label (e.g. "ENTAILMENT", "contradiction", "NEUTRAL")
    pub label: String,
    pub score: f64,
}

impl EntailmentScore {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

#[async_trait]
pub trait BaseEntailmentClassifier: Send + Sync {
    /// Classify how `premise` relates to `hypothesis`.
    /// Returns the probability of every class the model knows about.
    async fn classify(&self, premise: &str, hypothesis: &str) -> Result<Vec<EntailmentScore>>;
}

// =============================================================================
// Encyclopedia Trait (Infrastructure - evidence source)
// =============================================================================

/// An encyclopedia page resolved by exact title
#[derive(Debug, Clone, PartialEq)]
pub struct EncyclopediaPage {
    /// Canonical title after redirects
    pub title: String,
    /// Plain-text lead section
    pub summary: String,
}

#[async_trait]
pub trait BaseEncyclopedia: Send + Sync {
    /// Fetch a page by exact title (no auto-suggestion).
    /// Missing or disambiguation pages are errors.
    async fn page(&self, title: &str) -> Result<EncyclopediaPage>;

    /// Full-text search returning page titles in ranking order
    async fn search(&self, query: &str) -> Result<Vec<String>>;
}

// =============================================================================
// News Feed Trait (Infrastructure - evidence source)
// =============================================================================

/// A single news search hit
#[derive(Debug, Clone, PartialEq)]
pub struct NewsEntry {
    pub title: String,
    pub summary: Option<String>,
}

#[async_trait]
pub trait BaseNewsFeed: Send + Sync {
    /// Search the news feed, newest/most relevant first as the provider orders them
    async fn search(&self, query: &str) -> Result<Vec<NewsEntry>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_kind_from_ontonotes_labels() {
        assert_eq!(EntityKind::from_label("PERSON"), EntityKind::Person);
        assert_eq!(EntityKind::from_label("GPE"), EntityKind::GeopoliticalEntity);
        assert_eq!(EntityKind::from_label("PRODUCT"), EntityKind::Product);
        assert_eq!(EntityKind::from_label("LAW"), EntityKind::Law);
        assert_eq!(EntityKind::from_label("org"), EntityKind::Organization);
    }

    #[test]
    fn test_entity_kind_strips_bio_prefixes() {
        assert_eq!(EntityKind::from_label("B-PER"), EntityKind::Person);
        assert_eq!(EntityKind::from_label("I-ORG"), EntityKind::Organization);
        assert_eq!(EntityKind::from_label("B-LOC"), EntityKind::Location);
    }

    #[test]
    fn test_entity_kind_unknown_is_other() {
        assert_eq!(
            EntityKind::from_label("DATE"),
            EntityKind::Other("DATE".to_string())
        );
    }
}
