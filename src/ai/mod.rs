//! Summarization model capability and its HTTP-backed implementations.

pub mod huggingface;
pub mod openai;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

use crate::errors::SummarizerError;
use crate::summarize::LengthBudget;

pub use huggingface::HuggingFaceSummarizer;
pub use openai::OpenAiSummarizer;

const DEFAULT_MAX_RETRIES: usize = 3;
const DEFAULT_RETRY_FACTOR_MS: u64 = 250;
const MAX_RETRY_DELAY: Duration = Duration::from_secs(8);

/// Jittered exponential delays between attempts of a transiently failing call.
fn retry_strategy(max_retries: usize, factor_ms: u64) -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(2)
        .factor(factor_ms)
        .max_delay(MAX_RETRY_DELAY)
        .map(jitter)
        .take(max_retries)
}

/// A length-constrained summarization model.
///
/// Implementations return a single summary for `text` that aims to stay within
/// `budget`, or fail. Callers treat every failure the same way.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str, budget: LengthBudget) -> Result<String, SummarizerError>;

    /// Human-readable model identifier, reported by the info and health routes.
    fn model_name(&self) -> &str;
}

#[async_trait]
impl<T: Summarizer + ?Sized> Summarizer for Arc<T> {
    async fn summarize(&self, text: &str, budget: LengthBudget) -> Result<String, SummarizerError> {
        (**self).summarize(text, budget).await
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

#[async_trait]
impl<T: Summarizer + ?Sized> Summarizer for Box<T> {
    async fn summarize(&self, text: &str, budget: LengthBudget) -> Result<String, SummarizerError> {
        (**self).summarize(text, budget).await
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}
