//! Wikipedia client over the MediaWiki action API.
//!
//! Pages are resolved by exact title (redirects followed, no search-based
//! suggestion) and summarised by their plain-text lead section.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use super::{BaseEncyclopedia, EncyclopediaPage};

const USER_AGENT: &str = concat!("claim-verifier/", env!("CARGO_PKG_VERSION"));

/// Lookup faults the retriever skips over
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("page not found: {title}")]
    PageNotFound { title: String },

    #[error("disambiguation page: {title}")]
    Disambiguation { title: String },
}

/// Wikipedia API client implementation of BaseEncyclopedia
pub struct WikipediaClient {
    client: reqwest::Client,
    api_url: String,
    search_limit: usize,
}

#[derive(Debug, Deserialize)]
struct QueryResponse<T> {
    query: Option<T>,
}

#[derive(Debug, Deserialize)]
struct PagesQuery {
    #[serde(default)]
    pages: Vec<RawPage>,
}

#[derive(Debug, Deserialize)]
struct RawPage {
    title: String,
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    invalid: bool,
    #[serde(default)]
    extract: Option<String>,
    #[serde(default)]
    pageprops: Option<PageProps>,
}

#[derive(Debug, Deserialize)]
struct PageProps {
    #[serde(default)]
    disambiguation: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: String,
}

impl WikipediaClient {
    /// Create a new Wikipedia client
    pub fn new(api_url: impl Into<String>, timeout: Duration, search_limit: usize) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_url: api_url.into(),
            search_limit,
        })
    }

    async fn get_json(&self, params: &[(&str, &str)]) -> Result<String> {
        let response = self
            .client
            .get(&self.api_url)
            .query(params)
            .send()
            .await
            .context("Failed to send Wikipedia request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Wikipedia API error {}: {}", status, body);
        }

        response
            .text()
            .await
            .context("Failed to read Wikipedia response")
    }
}

/// Turn a `prop=extracts|pageprops` response into a page or a lookup fault
fn parse_page(requested: &str, body: &str) -> Result<EncyclopediaPage> {
    let response: QueryResponse<PagesQuery> =
        serde_json::from_str(body).context("Failed to parse Wikipedia page response")?;

    let not_found = || LookupError::PageNotFound {
        title: requested.to_string(),
    };

    let page = response
        .query
        .and_then(|q| q.pages.into_iter().next())
        .ok_or_else(not_found)?;

    if page.missing || page.invalid {
        return Err(not_found().into());
    }

    if page.pageprops.and_then(|p| p.disambiguation).is_some() {
        return Err(LookupError::Disambiguation { title: page.title }.into());
    }

    Ok(EncyclopediaPage {
        title: page.title,
        summary: page.extract.unwrap_or_default().trim().to_string(),
    })
}

fn parse_search(body: &str) -> Result<Vec<String>> {
    let response: QueryResponse<SearchQuery> =
        serde_json::from_str(body).context("Failed to parse Wikipedia search response")?;

    Ok(response
        .query
        .map(|q| q.search.into_iter().map(|hit| hit.title).collect())
        .unwrap_or_default())
}

#[async_trait]
impl BaseEncyclopedia for WikipediaClient {
    async fn page(&self, title: &str) -> Result<EncyclopediaPage> {
        let body = self
            .get_json(&[
                ("action", "query"),
                ("format", "json"),
                ("formatversion", "2"),
                ("prop", "extracts|pageprops"),
                ("ppprop", "disambiguation"),
                ("exintro", "1"),
                ("explaintext", "1"),
                ("redirects", "1"),
                ("titles", title),
            ])
            .await?;

        let page = parse_page(title, &body)?;
        debug!(title = %page.title, chars = page.summary.chars().count(), "Fetched Wikipedia page");
        Ok(page)
    }

    async fn search(&self, query: &str) -> Result<Vec<String>> {
        let limit = self.search_limit.to_string();
        let body = self
            .get_json(&[
                ("action", "query"),
                ("format", "json"),
                ("formatversion", "2"),
                ("list", "search"),
                ("srprop", ""),
                ("srlimit", &limit),
                ("srsearch", query),
            ])
            .await?;

        let titles = parse_search(&body)?;
        debug!(query = %query, hits = titles.len(), "Wikipedia search");
        Ok(titles)
    }
}
