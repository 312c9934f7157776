//! Pure model-inference REST client
//!
//! A minimal client for hosted inference endpoints that follow the
//! Hugging Face Inference API shape (`POST {base_url}/models/{model}`).
//! Covers the three tasks a text-analysis pipeline needs: named-entity
//! recognition, text-pair classification and sentence embeddings.
//!
//! # Example
//!
//! ```rust,ignore
//! use inference_client::InferenceClient;
//!
//! let client = InferenceClient::new(Some(token));
//!
//! let entities = client.token_classification("dslim/bert-base-NER", "Obama visited Paris").await?;
//! let scores = client
//!     .text_pair_classification("roberta-large-mnli", "premise", "hypothesis")
//!     .await?;
//! let vector = client
//!     .feature_extraction("sentence-transformers/all-MiniLM-L6-v2", "text to embed")
//!     .await?;
//! ```

pub mod error;
pub mod types;

pub use error::{InferenceError, Result};
pub use types::*;

use std::time::Duration;

use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co";

/// Number of labels requested from text-pair classifiers.
const TEXT_PAIR_TOP_K: usize = 8;

/// Pure inference API client.
#[derive(Clone)]
pub struct InferenceClient {
    http_client: Client,
    api_token: Option<String>,
    base_url: String,
    options: InferenceOptions,
}

impl InferenceClient {
    /// Create a new client. Without a token requests are sent anonymously.
    pub fn new(api_token: Option<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_token,
            base_url: DEFAULT_BASE_URL.to_string(),
            options: InferenceOptions::default(),
        }
    }

    /// Set a custom base URL (self-hosted inference servers, proxies).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Apply a request timeout to every call.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| InferenceError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(self)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Named-entity recognition with sub-word aggregation.
    pub async fn token_classification(&self, model: &str, text: &str) -> Result<Vec<EntitySpan>> {
        let request = TokenClassificationRequest {
            inputs: text.to_string(),
            parameters: TokenClassificationParameters {
                aggregation_strategy: "simple",
            },
            options: self.options.clone(),
        };

        self.post_model(model, &request).await
    }

    /// Classify the relation between a premise and a hypothesis.
    ///
    /// Returns every label the model produces, in the order the API sent them.
    pub async fn text_pair_classification(
        &self,
        model: &str,
        text: &str,
        text_pair: &str,
    ) -> Result<Vec<LabelScore>> {
        let request = TextPairRequest {
            inputs: TextPairInputs {
                text: text.to_string(),
                text_pair: text_pair.to_string(),
            },
            parameters: TextPairParameters {
                top_k: TEXT_PAIR_TOP_K,
            },
            options: self.options.clone(),
        };

        let response: ClassificationResponse = self.post_model(model, &request).await?;
        Ok(response.into_scores())
    }

    /// Create a single sentence embedding for text.
    pub async fn feature_extraction(&self, model: &str, text: &str) -> Result<Vec<f32>> {
        let request = FeatureExtractionRequest {
            inputs: text.to_string(),
            options: self.options.clone(),
        };

        let response: FeatureExtractionResponse = self.post_model(model, &request).await?;
        response.into_embedding()
    }

    async fn post_model<Req, Resp>(&self, model: &str, request: &Req) -> Result<Resp>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let start = std::time::Instant::now();

        let mut builder = self
            .http_client
            .post(format!("{}/models/{}", self.base_url, model))
            .header("Content-Type", "application/json")
            .json(request);
        if let Some(token) = &self.api_token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }

        let response = builder.send().await.map_err(|e| {
            warn!(model = %model, error = %e, "Inference request failed");
            InferenceError::Network(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(model = %model, status = %status, error = %error_text, "Inference API error");
            return Err(InferenceError::Api(format!(
                "Inference API error {}: {}",
                status, error_text
            )));
        }

        let parsed = response
            .json::<Resp>()
            .await
            .map_err(|e| InferenceError::Parse(e.to_string()))?;

        debug!(
            model = %model,
            duration_ms = start.elapsed().as_millis(),
            "Inference call"
        );

        Ok(parsed)
    }
}
