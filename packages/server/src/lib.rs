// Claim Verifier - API Core
//
// This crate provides the backend API that splits text into factual claims,
// gathers evidence for each from an encyclopedia and a news feed, and labels
// every claim with an entailment classifier.
//
// Models and evidence sources are injected through kernel::ServerDeps.

pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
