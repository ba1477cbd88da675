//! `OpenAI` Responses API client used as a length-bounded summarizer.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use tokio_retry::RetryIf;
use tracing::{info, warn};

use super::{DEFAULT_MAX_RETRIES, DEFAULT_RETRY_FACTOR_MS, Summarizer, retry_strategy};
use crate::errors::SummarizerError;
use crate::summarize::LengthBudget;

const RESPONSES_URL: &str = "https://api.openai.com/v1/responses";

// Output tokens allowed per requested word, leaving room for punctuation.
const TOKENS_PER_WORD: usize = 2;
const MIN_OUTPUT_TOKENS: usize = 64;

/// Chat model asked to summarize within a word range.
#[derive(Debug, Clone)]
pub struct OpenAiSummarizer {
    http: Client,
    api_key: String,
    org_id: Option<String>,
    model_name: String,
    endpoint: String,
    max_retries: usize,
    retry_factor_ms: u64,
}

impl OpenAiSummarizer {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        api_key: String,
        org_id: Option<String>,
        model_name: String,
        timeout: Duration,
    ) -> Result<Self, SummarizerError> {
        let http = Client::builder().timeout(timeout).build().map_err(|e| {
            SummarizerError::HttpError(format!("Failed to build OpenAI HTTP client: {e}"))
        })?;
        Ok(Self {
            http,
            api_key,
            org_id,
            model_name,
            endpoint: RESPONSES_URL.to_string(),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_factor_ms: DEFAULT_RETRY_FACTOR_MS,
        })
    }

    /// Points the client at a different Responses-compatible endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Overrides how often, and how quickly, rate limits and server errors are retried.
    #[must_use]
    pub fn with_retries(mut self, max_retries: usize, retry_factor_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.retry_factor_ms = retry_factor_ms;
        self
    }

    fn headers(&self) -> Result<reqwest::header::HeaderMap, SummarizerError> {
        let mut headers = reqwest::header::HeaderMap::new();
        let auth_value = format!("Bearer {}", self.api_key)
            .parse()
            .map_err(|e| SummarizerError::HttpError(format!("Invalid Authorization header: {e}")))?;
        headers.insert("Authorization", auth_value);

        if let Some(org) = &self.org_id {
            let org_value = org.parse().map_err(|e| {
                SummarizerError::HttpError(format!("Invalid OpenAI-Organization header: {e}"))
            })?;
            headers.insert("OpenAI-Organization", org_value);
        }
        Ok(headers)
    }

    async fn request_once(
        &self,
        text: &str,
        budget: LengthBudget,
        max_output_tokens: usize,
    ) -> Result<String, SummarizerError> {
        let request_body = json!({
            "model": self.model_name,
            "instructions": build_instructions(budget),
            "input": [{
                "role": "user",
                "content": [{ "type": "input_text", "text": text }]
            }],
            "max_output_tokens": max_output_tokens
        });

        let response = self
            .http
            .post(&self.endpoint)
            .headers(self.headers()?)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| SummarizerError::HttpError(format!("OpenAI API request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|e| {
                format!("Failed to read error response body (status {status}): {e}")
            });
            if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
                return Err(SummarizerError::ModelUnavailable(format!(
                    "OpenAI API status {status}: {error_text}"
                )));
            }
            return Err(SummarizerError::ModelError(format!(
                "OpenAI API error (status {status}): {error_text}"
            )));
        }

        let response_json: Value = response.json().await.map_err(|e| {
            SummarizerError::ModelError(format!("Failed to parse OpenAI response: {e}"))
        })?;

        extract_output_text(&response_json)
            .ok_or_else(|| SummarizerError::ModelError("No text in response".to_string()))
    }
}

#[must_use]
pub fn build_instructions(budget: LengthBudget) -> String {
    format!(
        "You summarize documents. Write a single plain-text summary of the user's text \
         between {} and {} words long. Keep the language of the source text. \
         Output only the summary, with no preamble, headings or lists.",
        budget.min_length, budget.max_length
    )
}

#[async_trait]
impl Summarizer for OpenAiSummarizer {
    async fn summarize(&self, text: &str, budget: LengthBudget) -> Result<String, SummarizerError> {
        let max_output_tokens = (budget.max_length * TOKENS_PER_WORD).max(MIN_OUTPUT_TOKENS);
        info!(
            model = %self.model_name,
            max_length = budget.max_length,
            min_length = budget.min_length,
            max_output_tokens,
            "Requesting summary"
        );

        RetryIf::start(
            retry_strategy(self.max_retries, self.retry_factor_ms),
            move || async move {
                let result = self.request_once(text, budget, max_output_tokens).await;
                if let Err(e) = &result
                    && e.is_transient()
                {
                    warn!("OpenAI temporarily unavailable, will retry: {}", e);
                }
                result
            },
            SummarizerError::is_transient,
        )
        .await
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

/// Collects the text of a Responses API payload, preferring the
/// `output_text` convenience field.
#[must_use]
pub fn extract_output_text(response_json: &Value) -> Option<String> {
    if let Some(text) = response_json.get("output_text").and_then(Value::as_str) {
        return Some(text.to_string());
    }

    let mut collected: Vec<String> = Vec::new();
    let items = response_json.get("output").and_then(Value::as_array)?;
    for item in items {
        let Some(parts) = item.get("content").and_then(Value::as_array) else {
            continue;
        };
        for p in parts {
            let is_output_text = p
                .get("type")
                .and_then(Value::as_str)
                .is_some_and(|t| t == "output_text");
            if !is_output_text {
                continue;
            }
            if let Some(s) = p.get("text").and_then(Value::as_str) {
                collected.push(s.to_string());
            } else if let Some(s) = p
                .get("text")
                .and_then(|t| t.get("value"))
                .and_then(Value::as_str)
            {
                collected.push(s.to_string());
            }
        }
    }

    if collected.is_empty() {
        None
    } else {
        Some(collected.join("\n"))
    }
}
