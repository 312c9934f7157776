// TestDependencies - mock implementations for testing
//
// Provides mock collaborators that can be injected into ServerDeps for tests.
// No mock touches the network; every call is recorded for assertions.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::{
    BaseEmbeddingService, BaseEncyclopedia, BaseEntailmentClassifier, BaseEntityRecognizer,
    BaseNewsFeed, EncyclopediaPage, EntailmentScore, EntityKind, LookupError, NamedEntity,
    NewsEntry, ServerDeps,
};
use crate::config::VerificationSettings;

// =============================================================================
// Mock Entity Recognizer
// =============================================================================

pub struct MockEntityRecognizer {
    entities: Arc<Mutex<HashMap<String, Vec<NamedEntity>>>>,
    fail: bool,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockEntityRecognizer {
    pub fn new() -> Self {
        Self {
            entities: Arc::new(Mutex::new(HashMap::new())),
            fail: false,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Entities returned when recognizing exactly `text`
    pub fn with_entities(self, text: &str, entities: Vec<(&str, EntityKind)>) -> Self {
        let entities = entities
            .into_iter()
            .map(|(t, kind)| NamedEntity::new(t, kind))
            .collect();
        self.entities
            .lock()
            .unwrap()
            .insert(text.to_string(), entities);
        self
    }

    /// Every call fails
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockEntityRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseEntityRecognizer for MockEntityRecognizer {
    async fn recognize(&self, text: &str) -> Result<Vec<NamedEntity>> {
        self.calls.lock().unwrap().push(text.to_string());
        if self.fail {
            anyhow::bail!("mock entity recognizer failure");
        }
        Ok(self
            .entities
            .lock()
            .unwrap()
            .get(text)
            .cloned()
            .unwrap_or_default())
    }
}

// =============================================================================
// Mock Embedding Service
// =============================================================================

pub struct MockEmbeddingService {
    // Returned when no pattern matches
    fixed_embedding: Vec<f32>,
    // First pattern contained in the text wins
    pattern_embeddings: Arc<Mutex<Vec<(String, Vec<f32>)>>>,
    failing_patterns: Arc<Mutex<Vec<String>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockEmbeddingService {
    pub fn new() -> Self {
        Self {
            fixed_embedding: vec![1.0, 0.0, 0.0],
            pattern_embeddings: Arc::new(Mutex::new(Vec::new())),
            failing_patterns: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.fixed_embedding = embedding;
        self
    }

    /// When text contains the pattern, return this embedding
    pub fn with_pattern_embedding(self, pattern: &str, embedding: Vec<f32>) -> Self {
        self.pattern_embeddings
            .lock()
            .unwrap()
            .push((pattern.to_string(), embedding));
        self
    }

    /// When text contains the pattern, fail
    pub fn failing_on(self, pattern: &str) -> Self {
        self.failing_patterns
            .lock()
            .unwrap()
            .push(pattern.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockEmbeddingService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseEmbeddingService for MockEmbeddingService {
    async fn generate(&self, text: &str) -> Result<Vec<f32>> {
        self.calls.lock().unwrap().push(text.to_string());

        if self
            .failing_patterns
            .lock()
            .unwrap()
            .iter()
            .any(|p| text.contains(p.as_str()))
        {
            anyhow::bail!("mock embedding failure");
        }

        let patterns = self.pattern_embeddings.lock().unwrap();
        Ok(patterns
            .iter()
            .find(|(pattern, _)| text.contains(pattern.as_str()))
            .map(|(_, embedding)| embedding.clone())
            .unwrap_or_else(|| self.fixed_embedding.clone()))
    }
}

// =============================================================================
// Mock Entailment Classifier
// =============================================================================

/// Arguments captured from a classify call
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifyCallArgs {
    pub premise: String,
    pub hypothesis: String,
}

pub struct MockEntailmentClassifier {
    fixed_scores: Vec<EntailmentScore>,
    // Keyed by a pattern contained in the hypothesis
    pattern_scores: Arc<Mutex<Vec<(String, Vec<EntailmentScore>)>>>,
    fail: bool,
    calls: Arc<Mutex<Vec<ClassifyCallArgs>>>,
}

impl MockEntailmentClassifier {
    pub fn new() -> Self {
        Self {
            fixed_scores: vec![
                EntailmentScore::new("ENTAILMENT", 0.9),
                EntailmentScore::new("NEUTRAL", 0.07),
                EntailmentScore::new("CONTRADICTION", 0.03),
            ],
            pattern_scores: Arc::new(Mutex::new(Vec::new())),
            fail: false,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_scores(mut self, scores: Vec<(&str, f64)>) -> Self {
        self.fixed_scores = scores
            .into_iter()
            .map(|(label, score)| EntailmentScore::new(label, score))
            .collect();
        self
    }

    /// Scores used when the hypothesis contains the pattern
    pub fn with_pattern_scores(self, pattern: &str, scores: Vec<(&str, f64)>) -> Self {
        let scores = scores
            .into_iter()
            .map(|(label, score)| EntailmentScore::new(label, score))
            .collect();
        self.pattern_scores
            .lock()
            .unwrap()
            .push((pattern.to_string(), scores));
        self
    }

    /// Every call fails
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn calls(&self) -> Vec<ClassifyCallArgs> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockEntailmentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseEntailmentClassifier for MockEntailmentClassifier {
    async fn classify(&self, premise: &str, hypothesis: &str) -> Result<Vec<EntailmentScore>> {
        self.calls.lock().unwrap().push(ClassifyCallArgs {
            premise: premise.to_string(),
            hypothesis: hypothesis.to_string(),
        });
        if self.fail {
            anyhow::bail!("mock classifier failure");
        }

        let patterns = self.pattern_scores.lock().unwrap();
        Ok(patterns
            .iter()
            .find(|(pattern, _)| hypothesis.contains(pattern.as_str()))
            .map(|(_, scores)| scores.clone())
            .unwrap_or_else(|| self.fixed_scores.clone()))
    }
}

// =============================================================================
// Mock Encyclopedia
// =============================================================================

#[derive(Clone)]
enum MockPage {
    Found(String),
    Disambiguation,
}

pub struct MockEncyclopedia {
    pages: Arc<Mutex<HashMap<String, MockPage>>>,
    search_results: Arc<Mutex<HashMap<String, Vec<String>>>>,
    fail_search: bool,
    page_calls: Arc<Mutex<Vec<String>>>,
    search_calls: Arc<Mutex<Vec<String>>>,
}

impl MockEncyclopedia {
    pub fn new() -> Self {
        Self {
            pages: Arc::new(Mutex::new(HashMap::new())),
            search_results: Arc::new(Mutex::new(HashMap::new())),
            fail_search: false,
            page_calls: Arc::new(Mutex::new(Vec::new())),
            search_calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Page resolvable by exact title
    pub fn with_page(self, title: &str, summary: &str) -> Self {
        self.pages
            .lock()
            .unwrap()
            .insert(title.to_string(), MockPage::Found(summary.to_string()));
        self
    }

    /// Title that resolves to a disambiguation page
    pub fn with_disambiguation(self, title: &str) -> Self {
        self.pages
            .lock()
            .unwrap()
            .insert(title.to_string(), MockPage::Disambiguation);
        self
    }

    /// Titles returned for an exact search query
    pub fn with_search(self, query: &str, titles: &[&str]) -> Self {
        self.search_results.lock().unwrap().insert(
            query.to_string(),
            titles.iter().map(|t| t.to_string()).collect(),
        );
        self
    }

    /// Every search call fails
    pub fn failing_search(mut self) -> Self {
        self.fail_search = true;
        self
    }

    pub fn page_calls(&self) -> Vec<String> {
        self.page_calls.lock().unwrap().clone()
    }

    pub fn search_calls(&self) -> Vec<String> {
        self.search_calls.lock().unwrap().clone()
    }
}

impl Default for MockEncyclopedia {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseEncyclopedia for MockEncyclopedia {
    async fn page(&self, title: &str) -> Result<EncyclopediaPage> {
        self.page_calls.lock().unwrap().push(title.to_string());

        let page = self.pages.lock().unwrap().get(title).cloned();
        match page {
            Some(MockPage::Found(summary)) => Ok(EncyclopediaPage {
                title: title.to_string(),
                summary,
            }),
            Some(MockPage::Disambiguation) => Err(LookupError::Disambiguation {
                title: title.to_string(),
            }
            .into()),
            None => Err(LookupError::PageNotFound {
                title: title.to_string(),
            }
            .into()),
        }
    }

    async fn search(&self, query: &str) -> Result<Vec<String>> {
        self.search_calls.lock().unwrap().push(query.to_string());
        if self.fail_search {
            anyhow::bail!("mock encyclopedia search failure");
        }
        Ok(self
            .search_results
            .lock()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or_default())
    }
}

// =============================================================================
// Mock News Feed
// =============================================================================

pub struct MockNewsFeed {
    entries: Arc<Mutex<HashMap<String, Vec<NewsEntry>>>>,
    fail: bool,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockNewsFeed {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            fail: false,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Entries returned for an exact query, as (title, summary) pairs
    pub fn with_entries(self, query: &str, entries: Vec<(&str, Option<&str>)>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(title, summary)| NewsEntry {
                title: title.to_string(),
                summary: summary.map(str::to_string),
            })
            .collect();
        self.entries
            .lock()
            .unwrap()
            .insert(query.to_string(), entries);
        self
    }

    /// Every call fails
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockNewsFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseNewsFeed for MockNewsFeed {
    async fn search(&self, query: &str) -> Result<Vec<NewsEntry>> {
        self.calls.lock().unwrap().push(query.to_string());
        if self.fail {
            anyhow::bail!("mock news feed failure");
        }
        Ok(self
            .entries
            .lock()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or_default())
    }
}

// =============================================================================
// TestDependencies - Builder for test dependencies
// =============================================================================

#[derive(Clone)]
pub struct TestDependencies {
    pub entity_recognizer: Arc<MockEntityRecognizer>,
    pub embedding_service: Arc<MockEmbeddingService>,
    pub entailment_classifier: Arc<MockEntailmentClassifier>,
    pub encyclopedia: Arc<MockEncyclopedia>,
    pub news_feed: Arc<MockNewsFeed>,
    pub settings: VerificationSettings,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            entity_recognizer: Arc::new(MockEntityRecognizer::new()),
            embedding_service: Arc::new(MockEmbeddingService::new()),
            entailment_classifier: Arc::new(MockEntailmentClassifier::new()),
            encyclopedia: Arc::new(MockEncyclopedia::new()),
            news_feed: Arc::new(MockNewsFeed::new()),
            settings: VerificationSettings::default(),
        }
    }

    /// Set a mock entity recognizer
    pub fn mock_entities(mut self, recognizer: MockEntityRecognizer) -> Self {
        self.entity_recognizer = Arc::new(recognizer);
        self
    }

    /// Set a mock embedding service
    pub fn mock_embeddings(mut self, service: MockEmbeddingService) -> Self {
        self.embedding_service = Arc::new(service);
        self
    }

    /// Set a mock entailment classifier
    pub fn mock_classifier(mut self, classifier: MockEntailmentClassifier) -> Self {
        self.entailment_classifier = Arc::new(classifier);
        self
    }

    /// Set a mock encyclopedia
    pub fn mock_encyclopedia(mut self, encyclopedia: MockEncyclopedia) -> Self {
        self.encyclopedia = Arc::new(encyclopedia);
        self
    }

    /// Set a mock news feed
    pub fn mock_news(mut self, news_feed: MockNewsFeed) -> Self {
        self.news_feed = Arc::new(news_feed);
        self
    }

    /// Override pipeline settings
    pub fn with_settings(mut self, settings: VerificationSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Build ServerDeps sharing these mocks (handles stay usable for assertions)
    pub fn server_deps(&self) -> ServerDeps {
        ServerDeps::new(
            self.entity_recognizer.clone(),
            self.embedding_service.clone(),
            self.entailment_classifier.clone(),
            self.encyclopedia.clone(),
            self.news_feed.clone(),
            self.settings.clone(),
        )
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
