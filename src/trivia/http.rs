use super::*;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Instant;

/// Client for The Trivia API (or any service speaking the same format)
pub struct TriviaApiClient {
    base_url: String,
    category_sample: u32,
    question_limit: u32,
    client: reqwest::Client,
}

impl TriviaApiClient {
    /// Create a new client from configuration
    pub fn new(config: &TriviaConfig) -> TriviaResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TriviaError::Config(e.to_string()))?;

        Ok(Self {
            base_url: config.base_url.clone(),
            category_sample: config.category_sample,
            question_limit: config.question_limit,
            client,
        })
    }

    /// Issue a single GET against the questions endpoint and decode the JSON body
    async fn get_json<T: DeserializeOwned>(&self, query: &[(&str, String)]) -> TriviaResult<T> {
        let start = Instant::now();

        let response = self
            .client
            .get(&self.base_url)
            .query(query)
            .send()
            .await
            .map_err(|e| TriviaError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(TriviaError::Status(response.status().as_u16()));
        }

        let body = response
            .json()
            .await
            .map_err(|e| TriviaError::Parse(e.to_string()))?;

        tracing::debug!(
            "Trivia API request {:?} completed in {}ms",
            query,
            start.elapsed().as_millis()
        );
        Ok(body)
    }
}

/// Only the field needed for category discovery
#[derive(Debug, Deserialize)]
struct ApiCategorySample {
    category: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiQuestion {
    category: String,
    question: ApiQuestionText,
    correct_answer: String,
    #[serde(default)]
    incorrect_answers: Vec<String>,
    #[serde(default)]
    difficulty: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiQuestionText {
    text: String,
}

impl From<ApiQuestion> for FetchedQuestion {
    fn from(q: ApiQuestion) -> Self {
        // An unrecognised tag counts as missing
        let difficulty = q.difficulty.as_deref().and_then(|d| d.parse().ok());

        FetchedQuestion {
            category: q.category,
            text: q.question.text,
            correct_answer: q.correct_answer,
            incorrect_answers: q.incorrect_answers,
            difficulty,
        }
    }
}

#[async_trait]
impl QuestionSource for TriviaApiClient {
    async fn fetch_categories(&self) -> TriviaResult<Vec<Category>> {
        let sample: Vec<ApiCategorySample> = self
            .get_json(&[("limit", self.category_sample.to_string())])
            .await?;

        let categories = distinct_categories(sample.into_iter().map(|q| q.category));
        tracing::info!("Discovered {} categories", categories.len());
        Ok(categories)
    }

    async fn fetch_questions(&self, category: &str) -> TriviaResult<Vec<FetchedQuestion>> {
        let questions: Vec<ApiQuestion> = self
            .get_json(&[
                ("categories", category.to_string()),
                ("limit", self.question_limit.to_string()),
            ])
            .await?;

        tracing::info!(
            "Fetched {} questions for category {}",
            questions.len(),
            category
        );
        Ok(questions.into_iter().map(FetchedQuestion::from).collect())
    }

    fn name(&self) -> &str {
        "the-trivia-api"
    }
}
