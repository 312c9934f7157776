//! Google News RSS search client.
//!
//! Fetches the public RSS search feed and reduces each item to its title and
//! a plain-text summary. Descriptions arrive as escaped HTML fragments, so
//! markup is stripped before the text reaches the relevance filter.

use anyhow::{Context, Result};
use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::{BaseNewsFeed, NewsEntry};

lazy_static! {
    static ref HTML_TAG_REGEX: Regex = Regex::new(r"<[^>]*>").unwrap();
    static ref WHITESPACE_REGEX: Regex = Regex::new(r"\s+").unwrap();
}

/// Google News implementation of BaseNewsFeed
pub struct GoogleNewsClient {
    client: reqwest::Client,
    feed_url: String,
}

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl GoogleNewsClient {
    /// Create a new news client against an RSS search endpoint
    pub fn new(feed_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            feed_url: feed_url.into(),
        })
    }
}

/// Parse an RSS 2.0 document into entries, skipping items without a title
fn parse_feed(xml: &str) -> Result<Vec<NewsEntry>> {
    let rss: Rss = quick_xml::de::from_str(xml).context("Failed to parse news RSS feed")?;

    Ok(rss
        .channel
        .items
        .into_iter()
        .filter_map(|item| {
            let title = clean_text(&item.title?);
            if title.is_empty() {
                return None;
            }
            let summary = item
                .description
                .map(|d| clean_text(&d))
                .filter(|d| !d.is_empty());
            Some(NewsEntry { title, summary })
        })
        .collect())
}

/// Strip HTML markup and collapse whitespace
fn clean_text(raw: &str) -> String {
    let without_tags = HTML_TAG_REGEX.replace_all(raw, " ");
    let decoded = without_tags.replace("&nbsp;", " ");
    WHITESPACE_REGEX
        .replace_all(&decoded, " ")
        .trim()
        .to_string()
}

#[async_trait]
impl BaseNewsFeed for GoogleNewsClient {
    async fn search(&self, query: &str) -> Result<Vec<NewsEntry>> {
        let response = self
            .client
            .get(&self.feed_url)
            .query(&[
                ("q", query),
                ("hl", "en-US"),
                ("gl", "US"),
                ("ceid", "US:en"),
            ])
            .send()
            .await
            .context("Failed to send news feed request")?;

        if !response.status().is_success() {
            let status = response.status();
            anyhow::bail!("News feed error {}", status);
        }

        let body = response
            .text()
            .await
            .context("Failed to read news feed response")?;

        let entries = parse_feed(&body)?;
        debug!(query = %query, entries = entries.len(), "News feed search");
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r##"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<rss version="2.0" xmlns:media="http://search.yahoo.com/mrss/">
  <channel>
    <generator>NFE/5.0</generator>
    <title>"Mars" - Google News</title>
    <link>https://news.google.com/search?q=Mars</link>
    <language>en-US</language>
    <item>
      <title>Rover finds ancient lake bed on Mars - Science Daily</title>
      <link>https://news.google.com/articles/abc</link>
      <guid isPermaLink="false">abc</guid>
      <pubDate>Mon, 19 Oct 2026 10:00:00 GMT</pubDate>
      <description>&lt;a href="https://news.google.com/articles/abc"&gt;Rover finds ancient lake bed&lt;/a&gt;&amp;nbsp;&amp;nbsp;&lt;font color="#6f6f6f"&gt;Science Daily&lt;/font&gt;</description>
      <source url="https://sciencedaily.com">Science Daily</source>
    </item>
    <item>
      <title>Mission update</title>
      <link>https://news.google.com/articles/def</link>
    </item>
  </channel>
</rss>"##;

    #[test]
    fn test_parse_feed_reads_items_in_order() {
        let entries = parse_feed(FEED).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries[0].title,
            "Rover finds ancient lake bed on Mars - Science Daily"
        );
        assert_eq!(entries[1].title, "Mission update");
    }

    #[test]
    fn test_parse_feed_strips_description_markup() {
        let entries = parse_feed(FEED).unwrap();
        assert_eq!(
            entries[0].summary.as_deref(),
            Some("Rover finds ancient lake bed Science Daily")
        );
        assert_eq!(entries[1].summary, None);
    }

    #[test]
    fn test_parse_feed_empty_channel() {
        let xml = r#"<rss version="2.0"><channel><title>Nothing</title></channel></rss>"#;
        assert!(parse_feed(xml).unwrap().is_empty());
    }

    #[test]
    fn test_parse_feed_rejects_garbage() {
        assert!(parse_feed("not xml at all").is_err());
    }

    #[test]
    fn test_clean_text_collapses_whitespace() {
        assert_eq!(clean_text("  a\n\t<b>b</b>   c "), "a b c");
    }
}
