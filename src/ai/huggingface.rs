//! Hugging Face inference client for seq2seq summarization models
//! (`facebook/bart-large-cnn` by default).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use tokio_retry::RetryIf;
use tracing::{info, warn};
use url::Url;

use super::{DEFAULT_MAX_RETRIES, DEFAULT_RETRY_FACTOR_MS, Summarizer, retry_strategy};
use crate::errors::SummarizerError;
use crate::summarize::LengthBudget;

/// Calls a hosted summarization pipeline with `max_length`/`min_length` parameters.
#[derive(Debug, Clone)]
pub struct HuggingFaceSummarizer {
    http: Client,
    api_url: Url,
    api_token: Option<String>,
    model: String,
    max_retries: usize,
    retry_factor_ms: u64,
}

impl HuggingFaceSummarizer {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        api_url: Url,
        api_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, SummarizerError> {
        let http = Client::builder().timeout(timeout).build().map_err(|e| {
            SummarizerError::HttpError(format!("Failed to build inference HTTP client: {e}"))
        })?;
        let model = model_from_url(&api_url);
        Ok(Self {
            http,
            api_url,
            api_token,
            model,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_factor_ms: DEFAULT_RETRY_FACTOR_MS,
        })
    }

    /// Overrides how often, and how quickly, transient failures are retried.
    #[must_use]
    pub fn with_retries(mut self, max_retries: usize, retry_factor_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.retry_factor_ms = retry_factor_ms;
        self
    }

    async fn request_once(
        &self,
        text: &str,
        budget: LengthBudget,
    ) -> Result<String, SummarizerError> {
        let body = json!({
            "inputs": text,
            "parameters": {
                "max_length": budget.max_length,
                "min_length": budget.min_length,
                "do_sample": false
            },
            "options": { "wait_for_model": true }
        });

        let mut request = self.http.post(self.api_url.clone()).json(&body);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SummarizerError::HttpError(format!("Inference request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|e| {
                format!("Failed to read error response body (status {status}): {e}")
            });
            if status == StatusCode::SERVICE_UNAVAILABLE || status == StatusCode::TOO_MANY_REQUESTS
            {
                return Err(SummarizerError::ModelUnavailable(format!(
                    "status {status}: {error_text}"
                )));
            }
            return Err(SummarizerError::ModelError(format!(
                "Inference API error (status {status}): {error_text}"
            )));
        }

        let response_json: Value = response.json().await.map_err(|e| {
            SummarizerError::ModelError(format!("Failed to parse inference response: {e}"))
        })?;

        parse_summary(&response_json)
    }
}

#[async_trait]
impl Summarizer for HuggingFaceSummarizer {
    async fn summarize(&self, text: &str, budget: LengthBudget) -> Result<String, SummarizerError> {
        info!(
            model = %self.model,
            max_length = budget.max_length,
            min_length = budget.min_length,
            "Requesting summary"
        );

        RetryIf::start(
            retry_strategy(self.max_retries, self.retry_factor_ms),
            move || async move {
                let result = self.request_once(text, budget).await;
                if let Err(e) = &result
                    && e.is_transient()
                {
                    warn!("Model temporarily unavailable, will retry: {}", e);
                }
                result
            },
            SummarizerError::is_transient,
        )
        .await
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Extracts the summary from a `[{"summary_text": ...}]` pipeline response.
fn parse_summary(response: &Value) -> Result<String, SummarizerError> {
    if let Some(message) = response.get("error").and_then(Value::as_str) {
        return Err(SummarizerError::ModelError(message.to_string()));
    }

    response
        .as_array()
        .and_then(|items| items.first())
        .or(Some(response))
        .and_then(|item| item.get("summary_text"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| SummarizerError::ModelError("No summary_text in response".to_string()))
}

fn model_from_url(url: &Url) -> String {
    let path = url.path();
    path.split_once("/models/")
        .map(|(_, model)| model.trim_matches('/').to_string())
        .filter(|model| !model.is_empty())
        .unwrap_or_else(|| url.to_string())
}
