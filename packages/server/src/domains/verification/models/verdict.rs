use serde::{Deserialize, Serialize};
use std::fmt;

/// User-facing outcome for a single claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerdictLabel {
    #[serde(rename = "True")]
    True,
    #[serde(rename = "False")]
    False,
    #[serde(rename = "Low Confidence – Further Verification Recommended")]
    LowConfidence,
    #[serde(rename = "Not Enough Evidence")]
    NotEnoughEvidence,
    #[serde(rename = "Error Evaluating Claim")]
    ErrorEvaluatingClaim,
}

impl VerdictLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerdictLabel::True => "True",
            VerdictLabel::False => "False",
            VerdictLabel::LowConfidence => "Low Confidence – Further Verification Recommended",
            VerdictLabel::NotEnoughEvidence => "Not Enough Evidence",
            VerdictLabel::ErrorEvaluatingClaim => "Error Evaluating Claim",
        }
    }

    /// True/False verdicts are the only ones subject to confidence relabeling
    pub fn is_binary(&self) -> bool {
        matches!(self, VerdictLabel::True | VerdictLabel::False)
    }
}

impl fmt::Display for VerdictLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One verified claim, as returned by `POST /verify`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub claim: String,
    pub label: VerdictLabel,
    /// Classifier probability rounded to 2 decimals; 0 without evidence or on failure
    pub score: f64,
    pub evidence: String,
    pub source: String,
}
