//! Claim verification domain.
//!
//! Text flows strictly downstream: text -> claims -> (keywords -> evidence ->
//! relevance) -> verdict. Nothing is kept between requests.

pub mod actions;
pub mod models;

// Re-export models (domain models)
pub use models::evidence::Evidence;
pub use models::verdict::{Verdict, VerdictLabel};

// Re-export the request-level entry point
pub use actions::verify_text;
