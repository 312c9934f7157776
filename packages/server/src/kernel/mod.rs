//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod inference;
pub mod news_client;
pub mod test_dependencies;
pub mod traits;
pub mod wikipedia_client;

pub use deps::ServerDeps;
pub use inference::{
    InferenceEmbeddingService, InferenceEntailmentClassifier, InferenceEntityRecognizer,
};
pub use news_client::GoogleNewsClient;
pub use test_dependencies::TestDependencies;
pub use traits::*;
pub use wikipedia_client::{LookupError, WikipediaClient};
