//! Model adapters over the hosted inference client.
//!
//! Each adapter pins one model name and implements one of the model traits,
//! so the verification pipeline never sees inference API details.

use anyhow::{Context, Result};
use async_trait::async_trait;
use inference_client::{EntitySpan, InferenceClient};
use std::sync::Arc;

use super::{
    BaseEmbeddingService, BaseEntailmentClassifier, BaseEntityRecognizer, EntailmentScore,
    EntityKind, NamedEntity,
};

/// Named-entity recognizer backed by a token-classification model
pub struct InferenceEntityRecognizer {
    client: Arc<InferenceClient>,
    model: String,
}

impl InferenceEntityRecognizer {
    pub fn new(client: Arc<InferenceClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl BaseEntityRecognizer for InferenceEntityRecognizer {
    async fn recognize(&self, text: &str) -> Result<Vec<NamedEntity>> {
        let spans = self
            .client
            .token_classification(&self.model, text)
            .await
            .context("Entity recognition failed")?;

        Ok(spans
            .into_iter()
            .filter_map(|span| {
                let surface = entity_surface(text, &span);
                if surface.is_empty() {
                    return None;
                }
                Some(NamedEntity::new(
                    surface,
                    EntityKind::from_label(&span.entity_group),
                ))
            })
            .collect())
    }
}

/// Slice `text` by character offsets, as token-classification models report them
fn char_span(text: &str, start: usize, end: usize) -> Option<&str> {
    if start >= end {
        return None;
    }
    let mut boundaries = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()));
    let byte_start = boundaries.nth(start)?;
    let byte_end = boundaries.nth(end - start - 1)?;
    text.get(byte_start..byte_end)
}

/// Exact source text of a span when its offsets fit, else the model's `word`
fn entity_surface(text: &str, span: &EntitySpan) -> String {
    span.start
        .zip(span.end)
        .and_then(|(start, end)| char_span(text, start, end))
        .unwrap_or(&span.word)
        .trim()
        .to_string()
}

/// Sentence embedding service backed by a feature-extraction model
pub struct InferenceEmbeddingService {
    client: Arc<InferenceClient>,
    model: String,
}

impl InferenceEmbeddingService {
    pub fn new(client: Arc<InferenceClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl BaseEmbeddingService for InferenceEmbeddingService {
    async fn generate(&self, text: &str) -> Result<Vec<f32>> {
        self.client
            .feature_extraction(&self.model, text)
            .await
            .context("Embedding generation failed")
    }
}

/// Entailment classifier backed by an NLI text-pair model
pub struct InferenceEntailmentClassifier {
    client: Arc<InferenceClient>,
    model: String,
}

impl InferenceEntailmentClassifier {
    pub fn new(client: Arc<InferenceClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl BaseEntailmentClassifier for InferenceEntailmentClassifier {
    async fn classify(&self, premise: &str, hypothesis: &str) -> Result<Vec<EntailmentScore>> {
        let scores = self
            .client
            .text_pair_classification(&self.model, premise, hypothesis)
            .await
            .context("Entailment classification failed")?;

        Ok(scores
            .into_iter()
            .map(|s| EntailmentScore::new(s.label, s.score))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(word: &str, start: Option<usize>, end: Option<usize>) -> EntitySpan {
        EntitySpan {
            entity_group: "PER".to_string(),
            word: word.to_string(),
            score: 0.99,
            start,
            end,
        }
    }

    #[test]
    fn test_offsets_are_characters_not_bytes() {
        let text = "Café owner Barack Obama spoke.";
        let surface = entity_surface(text, &span("barack obama", Some(11), Some(23)));
        assert_eq!(surface, "Barack Obama");
    }

    #[test]
    fn test_span_reaching_end_of_text() {
        assert_eq!(char_span("Straße Berlin", 7, 13), Some("Berlin"));
    }

    #[test]
    fn test_out_of_range_offsets_fall_back_to_word() {
        let text = "Naïve Obama";
        assert_eq!(entity_surface(text, &span(" Obama", Some(6), Some(40))), "Obama");
        assert_eq!(entity_surface(text, &span("Obama", Some(8), Some(3))), "Obama");
        assert_eq!(entity_surface(text, &span("Obama", None, None)), "Obama");
    }
}
