use tracing::info;

use super::derive_verdict::derive_verdict;
use super::extract_claims::extract_claims;
use super::retrieve_evidence::retrieve_evidence;
use crate::domains::verification::models::verdict::Verdict;
use crate::kernel::ServerDeps;

/// Verify every claim in a block of text.
///
/// Claims are processed one after another; exactly one verdict is produced
/// per extracted claim, in input order.
pub async fn verify_text(text: &str, deps: &ServerDeps) -> Vec<Verdict> {
    let claims = extract_claims(text, &deps.settings);
    info!(claims = claims.len(), "Extracted claims");

    let mut verdicts = Vec::with_capacity(claims.len());
    for claim in claims {
        let evidence = retrieve_evidence(&claim, deps).await;
        verdicts.push(derive_verdict(claim, evidence, deps).await);
    }

    verdicts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::verification::models::verdict::VerdictLabel;
    use crate::kernel::test_dependencies::{MockEmbeddingService, MockEncyclopedia};
    use crate::kernel::TestDependencies;

    #[tokio::test]
    async fn test_empty_text_yields_no_verdicts() {
        let deps = TestDependencies::new();
        assert!(verify_text("", &deps.server_deps()).await.is_empty());
        assert!(deps.entity_recognizer.calls().is_empty());
    }

    #[tokio::test]
    async fn test_one_verdict_per_claim_in_order() {
        let text = "The first claim has plenty of words in it. \
                    Short one. \
                    The second claim also has plenty of words.";
        let deps = TestDependencies::new();

        let verdicts = verify_text(text, &deps.server_deps()).await;

        let claims: Vec<_> = verdicts.iter().map(|v| v.claim.as_str()).collect();
        assert_eq!(
            claims,
            vec![
                "The first claim has plenty of words in it.",
                "The second claim also has plenty of words.",
            ]
        );
        assert!(verdicts
            .iter()
            .all(|v| v.label == VerdictLabel::NotEnoughEvidence && v.score == 0.0));
    }

    #[tokio::test]
    async fn test_same_inputs_same_verdicts() {
        let text = "The Great Wall of China is visible across northern China.";
        let deps = TestDependencies::new()
            .mock_embeddings(MockEmbeddingService::new().with_embedding(vec![1.0, 0.0]))
            .mock_encyclopedia(
                MockEncyclopedia::new()
                    .with_search("Great Wall China visible across northern", &["Great Wall of China"])
                    .with_page("Great Wall of China", "The Great Wall of China is a series of fortifications."),
            );
        let deps = deps.server_deps();

        let first = verify_text(text, &deps).await;
        let second = verify_text(text, &deps).await;

        assert_eq!(first, second);
        assert_eq!(first[0].label, VerdictLabel::True);
        assert_eq!(first[0].source, "Wikipedia - Great Wall of China");
    }
}
