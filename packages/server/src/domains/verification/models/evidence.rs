/// Provenance prefix for encyclopedia evidence ("Wikipedia - <title>")
pub const ENCYCLOPEDIA_SOURCE: &str = "Wikipedia";

/// Provenance label for news evidence
pub const NEWS_SOURCE: &str = "Google News";

/// A snippet judged relevant to a claim, with where it came from.
///
/// An empty snippet means no evidence was found; its source is then empty too.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Evidence {
    pub snippet: String,
    pub source: String,
}

impl Evidence {
    /// No relevant evidence from any source
    pub fn none() -> Self {
        Self::default()
    }

    /// Evidence from an encyclopedia page
    pub fn from_encyclopedia(snippet: impl Into<String>, title: &str) -> Self {
        Self {
            snippet: snippet.into(),
            source: format!("{} - {}", ENCYCLOPEDIA_SOURCE, title),
        }
    }

    /// Evidence from a news feed entry
    pub fn from_news(snippet: impl Into<String>) -> Self {
        Self {
            snippet: snippet.into(),
            source: NEWS_SOURCE.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.snippet.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_is_empty_with_empty_source() {
        let evidence = Evidence::none();
        assert!(evidence.is_empty());
        assert_eq!(evidence.source, "");
    }

    #[test]
    fn test_source_labels() {
        assert_eq!(
            Evidence::from_encyclopedia("summary", "Barack Obama").source,
            "Wikipedia - Barack Obama"
        );
        assert_eq!(Evidence::from_news("headline. body").source, "Google News");
    }
}
