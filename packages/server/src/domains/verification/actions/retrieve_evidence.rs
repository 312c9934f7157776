//! Evidence retrieval for a single claim.
//!
//! Stages run in a fixed order and the first relevant hit wins. A fetch
//! fault only skips that candidate (single attempt, no backoff); it never
//! fails the claim.

use tracing::{debug, info, warn};

use super::extract_keywords::keywords_from_entities;
use super::relevance::RelevanceFilter;
use crate::domains::verification::models::evidence::Evidence;
use crate::kernel::{EntityKind, LookupError, NamedEntity, ServerDeps};

/// Where evidence can come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvidenceStage {
    /// Exact encyclopedia pages for people named in the claim
    PersonPage,
    /// Encyclopedia search on the claim's keywords
    KeywordSearch,
    /// News feed search on the claim's keywords
    NewsFeed,
}

/// Stages in the order they are attempted
pub const EVIDENCE_STAGES: [EvidenceStage; 3] = [
    EvidenceStage::PersonPage,
    EvidenceStage::KeywordSearch,
    EvidenceStage::NewsFeed,
];

/// Cut text to at most `max_chars` characters
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Everything the stages share for one claim
struct ClaimContext<'a> {
    claim: &'a str,
    persons: Vec<String>,
    keywords: String,
    relevance: RelevanceFilter<'a>,
    deps: &'a ServerDeps,
}

impl<'a> ClaimContext<'a> {
    async fn new(claim: &'a str, deps: &'a ServerDeps) -> ClaimContext<'a> {
        let entities: Vec<NamedEntity> = match deps.entity_recognizer.recognize(claim).await {
            Ok(entities) => entities,
            Err(e) => {
                warn!(error = %e, "Entity recognition failed, skipping person lookup");
                Vec::new()
            }
        };

        let persons = entities
            .iter()
            .filter(|entity| entity.kind == EntityKind::Person)
            .map(|entity| entity.text.clone())
            .collect();
        let keywords = keywords_from_entities(claim, &entities, deps.settings.max_keywords);

        ClaimContext {
            claim,
            persons,
            keywords,
            relevance: RelevanceFilter::new(claim, deps),
            deps,
        }
    }

    async fn attempt(&self, stage: EvidenceStage) -> Option<Evidence> {
        match stage {
            EvidenceStage::PersonPage => self.person_page().await,
            EvidenceStage::KeywordSearch => self.keyword_search().await,
            EvidenceStage::NewsFeed => self.news_feed().await,
        }
    }

    async fn person_page(&self) -> Option<Evidence> {
        for name in &self.persons {
            if let Some(snippet) = self.relevant_page_summary(name).await {
                return Some(Evidence::from_encyclopedia(snippet, name));
            }
        }
        None
    }

    async fn keyword_search(&self) -> Option<Evidence> {
        if self.keywords.is_empty() {
            return None;
        }

        let titles = match self.deps.encyclopedia.search(&self.keywords).await {
            Ok(titles) => titles,
            Err(e) => {
                warn!(query = %self.keywords, error = %e, "Encyclopedia search failed");
                return None;
            }
        };

        for title in &titles {
            if let Some(snippet) = self.relevant_page_summary(title).await {
                return Some(Evidence::from_encyclopedia(snippet, title));
            }
        }
        None
    }

    async fn news_feed(&self) -> Option<Evidence> {
        if self.keywords.is_empty() {
            return None;
        }

        let entries = match self.deps.news_feed.search(&self.keywords).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!(query = %self.keywords, error = %e, "News feed search failed");
                return None;
            }
        };

        for entry in entries.iter().take(self.deps.settings.news_max_entries) {
            let summary = entry.summary.as_deref().unwrap_or(&entry.title);
            let content = format!("{}. {}", entry.title, summary);
            if self.relevance.is_relevant(&content).await {
                return Some(Evidence::from_news(content));
            }
        }
        None
    }

    /// Fetch a page by exact title and return its truncated summary if relevant
    async fn relevant_page_summary(&self, title: &str) -> Option<String> {
        let page = match self.deps.encyclopedia.page(title).await {
            Ok(page) => page,
            Err(e) => {
                if e.downcast_ref::<LookupError>().is_some() {
                    debug!(title = %title, error = %e, "Encyclopedia page skipped");
                } else {
                    warn!(title = %title, error = %e, "Encyclopedia page fetch failed");
                }
                return None;
            }
        };

        let snippet = truncate_chars(&page.summary, self.deps.settings.snippet_max_chars);
        if snippet.is_empty() {
            return None;
        }

        if self.relevance.is_relevant(&snippet).await {
            Some(snippet)
        } else {
            None
        }
    }
}

/// Find relevant evidence for a claim, or `Evidence::none()`
pub async fn retrieve_evidence(claim: &str, deps: &ServerDeps) -> Evidence {
    let context = ClaimContext::new(claim, deps).await;

    for stage in EVIDENCE_STAGES {
        debug!(stage = ?stage, "Trying evidence stage");
        if let Some(evidence) = context.attempt(stage).await {
            info!(
                claim = %context.claim,
                stage = ?stage,
                source = %evidence.source,
                "Found evidence"
            );
            return evidence;
        }
    }

    debug!(claim = %claim, "No relevant evidence found");
    Evidence::none()
}
