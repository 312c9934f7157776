//! Server dependencies for the verification pipeline (using traits for testability)
//!
//! Built once at process start and shared by reference into every request.
//! All external collaborators use trait abstractions so tests can swap in mocks.

use anyhow::Result;
use inference_client::InferenceClient;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{Config, VerificationSettings};
use crate::kernel::{
    BaseEmbeddingService, BaseEncyclopedia, BaseEntailmentClassifier, BaseEntityRecognizer,
    BaseNewsFeed, GoogleNewsClient, InferenceEmbeddingService, InferenceEntailmentClassifier,
    InferenceEntityRecognizer, WikipediaClient,
};

// =============================================================================
// ServerDeps
// =============================================================================

/// Process-lifetime models, evidence sources and pipeline settings
#[derive(Clone)]
pub struct ServerDeps {
    pub entity_recognizer: Arc<dyn BaseEntityRecognizer>,
    pub embedding_service: Arc<dyn BaseEmbeddingService>,
    pub entailment_classifier: Arc<dyn BaseEntailmentClassifier>,
    pub encyclopedia: Arc<dyn BaseEncyclopedia>,
    pub news_feed: Arc<dyn BaseNewsFeed>,
    pub settings: VerificationSettings,
}

impl ServerDeps {
    /// Create new ServerDeps with the given dependencies
    pub fn new(
        entity_recognizer: Arc<dyn BaseEntityRecognizer>,
        embedding_service: Arc<dyn BaseEmbeddingService>,
        entailment_classifier: Arc<dyn BaseEntailmentClassifier>,
        encyclopedia: Arc<dyn BaseEncyclopedia>,
        news_feed: Arc<dyn BaseNewsFeed>,
        settings: VerificationSettings,
    ) -> Self {
        Self {
            entity_recognizer,
            embedding_service,
            entailment_classifier,
            encyclopedia,
            news_feed,
            settings,
        }
    }

    /// Wire the production clients described by the configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let timeout = Duration::from_secs(config.http_timeout_secs);

        // One HTTP pool shared by all three models
        let inference = Arc::new(
            InferenceClient::new(config.hf_api_token.clone())
                .with_base_url(config.inference_base_url.clone())
                .with_timeout(timeout)?,
        );

        let encyclopedia = WikipediaClient::new(
            config.wikipedia_api_url.clone(),
            timeout,
            config.verification.wikipedia_search_limit,
        )?;
        let news_feed = GoogleNewsClient::new(config.news_feed_url.clone(), timeout)?;

        Ok(Self::new(
            Arc::new(InferenceEntityRecognizer::new(
                inference.clone(),
                config.ner_model.clone(),
            )),
            Arc::new(InferenceEmbeddingService::new(
                inference.clone(),
                config.embedding_model.clone(),
            )),
            Arc::new(InferenceEntailmentClassifier::new(
                inference,
                config.nli_model.clone(),
            )),
            Arc::new(encyclopedia),
            Arc::new(news_feed),
            config.verification.clone(),
        ))
    }
}
