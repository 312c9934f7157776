//! Verdict derivation from an NLI classification of (evidence, claim).

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::config::VerificationSettings;
use crate::domains::verification::models::evidence::Evidence;
use crate::domains::verification::models::verdict::{Verdict, VerdictLabel};
use crate::kernel::{EntailmentScore, ServerDeps};

/// Relation the classifier found between evidence and claim
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NliCategory {
    Entailment,
    Contradiction,
    /// Neutral or any label the model emits besides the two above
    Neutral,
}

impl NliCategory {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_uppercase().as_str() {
            "ENTAILMENT" => NliCategory::Entailment,
            "CONTRADICTION" => NliCategory::Contradiction,
            _ => NliCategory::Neutral,
        }
    }
}

/// Round a probability to 2 decimal places.
///
/// Rounds the exact decimal value of the float, so 0.615 (stored just below
/// it) becomes 0.61 rather than 0.62.
pub fn round_score(score: f64) -> f64 {
    format!("{:.2}", score).parse().unwrap_or(score)
}

/// Map the top category and its (rounded) score to a label.
///
/// Neutral never yields a neutral verdict: it is forced to True/False by
/// score. Binary labels inside the low-confidence band are relabeled.
pub fn label_for_prediction(
    category: NliCategory,
    score: f64,
    settings: &VerificationSettings,
) -> VerdictLabel {
    let label = match category {
        NliCategory::Entailment => VerdictLabel::True,
        NliCategory::Contradiction => VerdictLabel::False,
        NliCategory::Neutral if score >= settings.neutral_true_min => VerdictLabel::True,
        NliCategory::Neutral => VerdictLabel::False,
    };

    let in_low_band = score >= settings.low_confidence_min && score < settings.low_confidence_max;
    if in_low_band && label.is_binary() {
        VerdictLabel::LowConfidence
    } else {
        label
    }
}

/// Highest-probability class; the first one wins a tie
fn top_score(scores: &[EntailmentScore]) -> Result<&EntailmentScore> {
    scores
        .iter()
        .reduce(|best, candidate| {
            if candidate.score > best.score {
                candidate
            } else {
                best
            }
        })
        .context("Classifier returned no scores")
}

async fn classify(evidence: &str, claim: &str, deps: &ServerDeps) -> Result<(VerdictLabel, f64)> {
    let scores = deps
        .entailment_classifier
        .classify(evidence, claim)
        .await?;
    let top = top_score(&scores)?;

    if !top.score.is_finite() {
        anyhow::bail!("Classifier returned a non-finite score for {}", top.label);
    }

    let score = round_score(top.score);
    let category = NliCategory::from_label(&top.label);
    debug!(label = %top.label, score = score, "Classifier prediction");

    Ok((label_for_prediction(category, score, &deps.settings), score))
}

/// Build the verdict record for a claim and its evidence
pub async fn derive_verdict(claim: String, evidence: Evidence, deps: &ServerDeps) -> Verdict {
    let (label, score) = if evidence.is_empty() {
        (VerdictLabel::NotEnoughEvidence, 0.0)
    } else {
        match classify(&evidence.snippet, &claim, deps).await {
            Ok(result) => result,
            Err(e) => {
                warn!(claim = %claim, error = %e, "Claim classification failed");
                (VerdictLabel::ErrorEvaluatingClaim, 0.0)
            }
        }
    };

    Verdict {
        claim,
        label,
        score,
        evidence: evidence.snippet,
        source: evidence.source,
    }
}
