mod http;

use async_trait::async_trait;
use std::collections::HashSet;
use std::time::Duration;

use crate::types::{Category, FetchedQuestion};

pub use http::TriviaApiClient;

/// Public endpoint of The Trivia API
pub const DEFAULT_BASE_URL: &str = "https://the-trivia-api.com/v2/questions";

/// Result type for trivia service operations
pub type TriviaResult<T> = Result<T, TriviaError>;

/// Errors that can occur while talking to the trivia service.
///
/// The game treats every variant the same way: the service is unavailable.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TriviaError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Trivia service returned status: {0}")]
    Status(u16),

    #[error("Response parsing failed: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Source of categories and questions for the game
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Discover the categories currently offered by the service
    async fn fetch_categories(&self) -> TriviaResult<Vec<Category>>;

    /// Fetch raw questions for a single category
    async fn fetch_questions(&self, category: &str) -> TriviaResult<Vec<FetchedQuestion>>;

    /// Get the name of this source
    fn name(&self) -> &str;
}

/// Configuration for the trivia service client
#[derive(Debug, Clone, PartialEq)]
pub struct TriviaConfig {
    /// Questions endpoint
    pub base_url: String,
    /// Sample size used to discover categories
    pub category_sample: u32,
    /// Questions requested per category
    pub question_limit: u32,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for TriviaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            category_sample: 10,
            question_limit: 6,
            timeout: Duration::from_secs(10),
        }
    }
}

impl TriviaConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let base_url = std::env::var("TRIVIA_API_URL")
            .ok()
            .and_then(|url| {
                let trimmed = url.trim().trim_end_matches('/');
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            })
            .unwrap_or(defaults.base_url);

        Self {
            base_url,
            category_sample: std::env::var("TRIVIA_CATEGORY_SAMPLE")
                .ok()
                .and_then(|s| s.trim().parse::<u32>().ok())
                .filter(|n| *n > 0)
                .unwrap_or(defaults.category_sample),
            question_limit: std::env::var("TRIVIA_QUESTION_LIMIT")
                .ok()
                .and_then(|s| s.trim().parse::<u32>().ok())
                .filter(|n| *n > 0)
                .unwrap_or(defaults.question_limit),
            timeout: std::env::var("TRIVIA_TIMEOUT")
                .ok()
                .and_then(|s| s.trim().parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        }
    }
}

/// Collapse a stream of category labels into distinct categories, keeping the
/// order in which they were first seen.
///
/// Discovery only sees categories present in the sampled questions; anything the
/// sample misses is not offered to the players.
pub fn distinct_categories<I>(labels: I) -> Vec<Category>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    labels
        .into_iter()
        .filter(|label| !label.is_empty() && seen.insert(label.clone()))
        .collect()
}
