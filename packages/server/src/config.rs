use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub hf_api_token: Option<String>,
    pub inference_base_url: String,
    pub ner_model: String,
    pub embedding_model: String,
    pub nli_model: String,
    pub wikipedia_api_url: String,
    pub news_feed_url: String,
    pub http_timeout_secs: u64,
    pub verification: VerificationSettings,
}

/// Tunable constants of the verification pipeline.
///
/// Defaults are the shipped thresholds; each can be overridden from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationSettings {
    /// Minimum cosine similarity (exclusive) for evidence to count as relevant
    pub relevance_threshold: f32,
    /// Lower bound (inclusive) of the low-confidence relabeling band
    pub low_confidence_min: f64,
    /// Upper bound (exclusive) of the low-confidence relabeling band
    pub low_confidence_max: f64,
    /// Neutral predictions at or above this score are labeled "True"
    pub neutral_true_min: f64,
    /// Sentences need strictly more whitespace tokens than this to be claims
    pub min_claim_tokens: usize,
    /// Maximum number of terms in a search query
    pub max_keywords: usize,
    /// Encyclopedia summaries are cut to this many characters
    pub snippet_max_chars: usize,
    /// Number of news entries checked per claim
    pub news_max_entries: usize,
    /// Number of encyclopedia search hits checked per claim
    pub wikipedia_search_limit: usize,
}

impl Default for VerificationSettings {
    fn default() -> Self {
        Self {
            relevance_threshold: 0.4,
            low_confidence_min: 0.5,
            low_confidence_max: 0.8,
            neutral_true_min: 0.75,
            min_claim_tokens: 5,
            max_keywords: 6,
            snippet_max_chars: 800,
            news_max_entries: 10,
            wikipedia_search_limit: 10,
        }
    }
}

impl VerificationSettings {
    /// Load overrides from the environment, keeping defaults for unset variables
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            relevance_threshold: parse_var("RELEVANCE_THRESHOLD", defaults.relevance_threshold)?,
            low_confidence_min: parse_var("LOW_CONFIDENCE_MIN", defaults.low_confidence_min)?,
            low_confidence_max: parse_var("LOW_CONFIDENCE_MAX", defaults.low_confidence_max)?,
            neutral_true_min: parse_var("NEUTRAL_TRUE_MIN", defaults.neutral_true_min)?,
            min_claim_tokens: parse_var("MIN_CLAIM_TOKENS", defaults.min_claim_tokens)?,
            max_keywords: parse_var("MAX_KEYWORDS", defaults.max_keywords)?,
            snippet_max_chars: parse_var("SNIPPET_MAX_CHARS", defaults.snippet_max_chars)?,
            news_max_entries: parse_var("NEWS_MAX_ENTRIES", defaults.news_max_entries)?,
            wikipedia_search_limit: parse_var(
                "WIKIPEDIA_SEARCH_LIMIT",
                defaults.wikipedia_search_limit,
            )?,
        })
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_var("PORT", 5000)?,
            hf_api_token: env::var("HF_API_TOKEN").ok().filter(|t| !t.is_empty()),
            inference_base_url: env::var("INFERENCE_BASE_URL")
                .unwrap_or_else(|_| "https://api-inference.huggingface.co".to_string()),
            ner_model: env::var("NER_MODEL")
                .unwrap_or_else(|_| "tner/roberta-large-ontonotes5".to_string()),
            embedding_model: env::var("EMBEDDING_MODEL")
                .unwrap_or_else(|_| "sentence-transformers/all-MiniLM-L6-v2".to_string()),
            nli_model: env::var("NLI_MODEL").unwrap_or_else(|_| "roberta-large-mnli".to_string()),
            wikipedia_api_url: env::var("WIKIPEDIA_API_URL")
                .unwrap_or_else(|_| "https://en.wikipedia.org/w/api.php".to_string()),
            news_feed_url: env::var("NEWS_FEED_URL")
                .unwrap_or_else(|_| "https://news.google.com/rss/search".to_string()),
            http_timeout_secs: parse_var("HTTP_TIMEOUT_SECS", 30)?,
            verification: VerificationSettings::from_env()?,
        })
    }

    /// Socket address string the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a valid number (got {:?})", name, raw)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_match_shipped_thresholds() {
        let settings = VerificationSettings::default();
        assert_eq!(settings.relevance_threshold, 0.4);
        assert_eq!(settings.low_confidence_min, 0.5);
        assert_eq!(settings.low_confidence_max, 0.8);
        assert_eq!(settings.neutral_true_min, 0.75);
        assert_eq!(settings.min_claim_tokens, 5);
        assert_eq!(settings.max_keywords, 6);
        assert_eq!(settings.snippet_max_chars, 800);
        assert_eq!(settings.news_max_entries, 10);
    }

    #[test]
    fn test_parse_var_reads_and_rejects() {
        env::set_var("VERIFIER_TEST_PARSE_OK", " 42 ");
        env::set_var("VERIFIER_TEST_PARSE_BAD", "forty-two");

        assert_eq!(parse_var::<u16>("VERIFIER_TEST_PARSE_OK", 1).unwrap(), 42);
        assert_eq!(parse_var::<u16>("VERIFIER_TEST_PARSE_UNSET", 7).unwrap(), 7);

        let err = parse_var::<u16>("VERIFIER_TEST_PARSE_BAD", 1).unwrap_err();
        assert!(err.to_string().contains("VERIFIER_TEST_PARSE_BAD"));
    }
}
