//! Verification actions - entry-point business logic
//!
//! `verify_text` is called directly from the HTTP route. The other actions
//! are the pipeline stages it runs for each claim.

pub mod derive_verdict;
pub mod extract_claims;
pub mod extract_keywords;
pub mod relevance;
pub mod retrieve_evidence;
pub mod verify_text;

// Re-export for convenience
pub use derive_verdict::{derive_verdict, label_for_prediction, round_score, NliCategory};
pub use extract_claims::extract_claims;
pub use extract_keywords::keywords_from_entities;
pub use relevance::{cosine_similarity, RelevanceFilter};
pub use retrieve_evidence::{retrieve_evidence, EvidenceStage, EVIDENCE_STAGES};
pub use verify_text::verify_text;
