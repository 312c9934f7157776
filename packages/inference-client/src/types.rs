//! Inference API request and response types.

use serde::{Deserialize, Serialize};

use crate::error::{InferenceError, Result};

// =============================================================================
// Shared
// =============================================================================

/// Request options understood by every inference task.
#[derive(Debug, Clone, Serialize)]
pub struct InferenceOptions {
    /// Block until a cold model is loaded instead of failing with 503
    pub wait_for_model: bool,
}

impl Default for InferenceOptions {
    fn default() -> Self {
        Self {
            wait_for_model: true,
        }
    }
}

// =============================================================================
// Token Classification (NER)
// =============================================================================

/// Token classification request.
#[derive(Debug, Serialize)]
pub(crate) struct TokenClassificationRequest {
    pub inputs: String,
    pub parameters: TokenClassificationParameters,
    pub options: InferenceOptions,
}

#[derive(Debug, Serialize)]
pub(crate) struct TokenClassificationParameters {
    /// Merge sub-word tokens into whole entity spans
    pub aggregation_strategy: &'static str,
}

/// One recognized entity span.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EntitySpan {
    /// Raw label emitted by the model (e.g. "PERSON", "B-ORG", "GPE")
    #[serde(alias = "entity")]
    pub entity_group: String,

    /// Surface text of the span
    pub word: String,

    /// Model confidence (0.0 to 1.0)
    #[serde(default)]
    pub score: f32,

    #[serde(default)]
    pub start: Option<usize>,

    #[serde(default)]
    pub end: Option<usize>,
}

// =============================================================================
// Text-pair Classification (NLI)
// =============================================================================

/// Text-pair classification request.
#[derive(Debug, Serialize)]
pub(crate) struct TextPairRequest {
    pub inputs: TextPairInputs,
    pub parameters: TextPairParameters,
    pub options: InferenceOptions,
}

#[derive(Debug, Serialize)]
pub(crate) struct TextPairInputs {
    pub text: String,
    pub text_pair: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct TextPairParameters {
    /// Number of labels to return; large enough to cover every class
    pub top_k: usize,
}

/// A single class label with its probability.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

/// Classification responses come back either flat or wrapped once per input.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ClassificationResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

impl ClassificationResponse {
    pub(crate) fn into_scores(self) -> Vec<LabelScore> {
        match self {
            ClassificationResponse::Nested(outer) => outer.into_iter().next().unwrap_or_default(),
            ClassificationResponse::Flat(scores) => scores,
        }
    }
}

// =============================================================================
// Feature Extraction (Embeddings)
// =============================================================================

/// Feature extraction request.
#[derive(Debug, Serialize)]
pub(crate) struct FeatureExtractionRequest {
    pub inputs: String,
    pub options: InferenceOptions,
}

/// Sentence-transformer models return a pooled vector; plain encoders
/// return one vector per token.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum FeatureExtractionResponse {
    Pooled(Vec<f32>),
    TokenLevel(Vec<Vec<f32>>),
    Batched(Vec<Vec<Vec<f32>>>),
}

impl FeatureExtractionResponse {
    pub(crate) fn into_embedding(self) -> Result<Vec<f32>> {
        match self {
            FeatureExtractionResponse::Pooled(vector) if !vector.is_empty() => Ok(vector),
            FeatureExtractionResponse::Pooled(_) => {
                Err(InferenceError::Parse("Empty embedding vector".into()))
            }
            FeatureExtractionResponse::TokenLevel(tokens) => mean_pool(&tokens),
            FeatureExtractionResponse::Batched(batch) => {
                let tokens = batch
                    .into_iter()
                    .next()
                    .ok_or_else(|| InferenceError::Parse("Empty embedding batch".into()))?;
                mean_pool(&tokens)
            }
        }
    }
}

/// Average token vectors into a single sentence vector.
pub fn mean_pool(tokens: &[Vec<f32>]) -> Result<Vec<f32>> {
    let first = tokens
        .first()
        .ok_or_else(|| InferenceError::Parse("No token vectors to pool".into()))?;
    let dim = first.len();

    let mut pooled = vec![0.0f32; dim];
    for token in tokens {
        if token.len() != dim {
            return Err(InferenceError::Parse(format!(
                "Ragged token vectors: expected {} dimensions, got {}",
                dim,
                token.len()
            )));
        }
        for (acc, value) in pooled.iter_mut().zip(token) {
            *acc += value;
        }
    }

    let count = tokens.len() as f32;
    for value in &mut pooled {
        *value /= count;
    }
    Ok(pooled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_response_nested() {
        let json = r#"[[{"label":"ENTAILMENT","score":0.9},{"label":"NEUTRAL","score":0.07}]]"#;
        let response: ClassificationResponse = serde_json::from_str(json).unwrap();
        let scores = response.into_scores();
        assert_eq!(scores.len(), 2);
        assert_eq!(scores[0].label, "ENTAILMENT");
    }

    #[test]
    fn test_classification_response_flat() {
        let json = r#"[{"label":"CONTRADICTION","score":0.8}]"#;
        let response: ClassificationResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.into_scores()[0].label, "CONTRADICTION");
    }

    #[test]
    fn test_entity_span_accepts_ungrouped_label() {
        let json = r#"{"entity":"B-PER","word":"Obama","score":0.99,"start":7,"end":12}"#;
        let span: EntitySpan = serde_json::from_str(json).unwrap();
        assert_eq!(span.entity_group, "B-PER");
        assert_eq!(span.start, Some(7));
    }

    #[test]
    fn test_feature_extraction_token_level_is_mean_pooled() {
        let json = "[[1.0, 3.0], [3.0, 5.0]]";
        let response: FeatureExtractionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.into_embedding().unwrap(), vec![2.0, 4.0]);
    }

    #[test]
    fn test_feature_extraction_pooled_passthrough() {
        let json = "[0.5, -0.25, 1.0]";
        let response: FeatureExtractionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.into_embedding().unwrap(), vec![0.5, -0.25, 1.0]);
    }

    #[test]
    fn test_mean_pool_rejects_ragged_input() {
        let tokens = vec![vec![1.0, 2.0], vec![1.0]];
        assert!(matches!(mean_pool(&tokens), Err(InferenceError::Parse(_))));
    }
}
