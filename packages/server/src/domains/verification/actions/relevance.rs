//! Semantic relevance between a claim and candidate evidence.
//!
//! Fail-closed: any embedding or similarity fault means "not relevant".

use anyhow::Result;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use crate::kernel::{BaseEmbeddingService, ServerDeps};

/// Cosine similarity of two equal-length, non-zero vectors
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        anyhow::bail!(
            "Embedding dimension mismatch: {} vs {}",
            a.len(),
            b.len()
        );
    }
    if a.is_empty() {
        anyhow::bail!("Empty embedding");
    }

    let mut dot = 0.0f32;
    let mut a_norm = 0.0f32;
    let mut b_norm = 0.0f32;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        a_norm += x * x;
        b_norm += y * y;
    }

    let denominator = a_norm.sqrt() * b_norm.sqrt();
    if denominator == 0.0 || !denominator.is_finite() {
        anyhow::bail!("Embedding has zero or non-finite norm");
    }

    Ok(dot / denominator)
}

/// Strictly greater than: a similarity equal to the threshold is rejected
pub fn passes_threshold(similarity: f32, threshold: f32) -> bool {
    similarity > threshold
}

/// Relevance checks against one claim.
///
/// The claim embedding is computed on first use and reused for every
/// candidate; a failed attempt is retried on the next candidate.
pub struct RelevanceFilter<'a> {
    embeddings: &'a dyn BaseEmbeddingService,
    claim: &'a str,
    threshold: f32,
    claim_embedding: OnceCell<Vec<f32>>,
}

impl<'a> RelevanceFilter<'a> {
    pub fn new(claim: &'a str, deps: &'a ServerDeps) -> Self {
        Self {
            embeddings: deps.embedding_service.as_ref(),
            claim,
            threshold: deps.settings.relevance_threshold,
            claim_embedding: OnceCell::new(),
        }
    }

    /// Whether the candidate text is relevant evidence for the claim
    pub async fn is_relevant(&self, candidate: &str) -> bool {
        match self.similarity(candidate).await {
            Ok(similarity) => {
                let relevant = passes_threshold(similarity, self.threshold);
                debug!(
                    similarity = similarity,
                    threshold = self.threshold,
                    relevant = relevant,
                    "Relevance check"
                );
                relevant
            }
            Err(e) => {
                warn!(error = %e, "Relevance check failed, treating candidate as not relevant");
                false
            }
        }
    }

    async fn similarity(&self, candidate: &str) -> Result<f32> {
        let claim_embedding = self
            .claim_embedding
            .get_or_try_init(|| self.embeddings.generate(self.claim))
            .await?;
        let candidate_embedding = self.embeddings.generate(candidate).await?;

        cosine_similarity(claim_embedding, &candidate_embedding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::MockEmbeddingService;
    use crate::kernel::TestDependencies;

    #[test]
    fn test_cosine_similarity_basics() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]).unwrap() - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).unwrap().abs() < 1e-6);
        assert!((cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]).unwrap() + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_rejects_bad_vectors() {
        assert!(cosine_similarity(&[1.0, 0.0], &[1.0]).is_err());
        assert!(cosine_similarity(&[], &[]).is_err());
        assert!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]).is_err());
    }

    #[test]
    fn test_threshold_is_strict() {
        assert!(passes_threshold(0.41, 0.4));
        assert!(!passes_threshold(0.40, 0.4));
        assert!(!passes_threshold(0.1, 0.4));
    }

    #[tokio::test]
    async fn test_similar_candidate_is_relevant() {
        let deps = TestDependencies::new().mock_embeddings(
            MockEmbeddingService::new()
                .with_pattern_embedding("claim", vec![1.0, 0.0])
                .with_pattern_embedding("close", vec![0.9, 0.1])
                .with_pattern_embedding("far", vec![0.1, 0.9]),
        );
        let deps = deps.server_deps();
        let filter = RelevanceFilter::new("the claim", &deps);

        assert!(filter.is_relevant("a close candidate").await);
        assert!(!filter.is_relevant("a far candidate").await);
    }

    #[tokio::test]
    async fn test_claim_embedding_is_reused() {
        let test_deps = TestDependencies::new();
        let deps = test_deps.server_deps();
        let filter = RelevanceFilter::new("the claim", &deps);

        filter.is_relevant("first").await;
        filter.is_relevant("second").await;

        assert_eq!(
            test_deps.embedding_service.calls(),
            vec!["the claim", "first", "second"]
        );
    }

    #[tokio::test]
    async fn test_embedding_failure_fails_closed() {
        let deps = TestDependencies::new()
            .mock_embeddings(MockEmbeddingService::new().failing_on("broken"));
        let deps = deps.server_deps();
        let filter = RelevanceFilter::new("the claim", &deps);

        // Identical default embeddings would otherwise be a perfect match
        assert!(!filter.is_relevant("broken candidate").await);
        assert!(filter.is_relevant("fine candidate").await);
    }

    #[tokio::test]
    async fn test_dimension_mismatch_fails_closed() {
        let deps = TestDependencies::new().mock_embeddings(
            MockEmbeddingService::new()
                .with_pattern_embedding("claim", vec![1.0, 0.0, 0.0])
                .with_pattern_embedding("short", vec![1.0, 0.0]),
        );
        let deps = deps.server_deps();

        assert!(!RelevanceFilter::new("the claim", &deps)
            .is_relevant("short candidate")
            .await);
    }
}
