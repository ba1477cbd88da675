use std::sync::Arc;

use tracing::info;

use crate::ai::{HuggingFaceSummarizer, OpenAiSummarizer, Summarizer};
use crate::core::config::{AppConfig, SummarizerBackend};
use crate::errors::SummarizerError;
use crate::summarize::Orchestrator;

/// Everything a request needs, built once per Lambda container.
pub struct AppState {
    pub config: AppConfig,
    pub orchestrator: Orchestrator<Arc<dyn Summarizer>>,
}

impl AppState {
    #[must_use]
    pub fn new(config: AppConfig, summarizer: Arc<dyn Summarizer>) -> Self {
        let orchestrator = Orchestrator::with_policy(summarizer, config.policy);
        Self {
            config,
            orchestrator,
        }
    }

    /// # Errors
    ///
    /// Returns an error if the configured model client cannot be built.
    pub fn from_config(config: AppConfig) -> Result<Self, SummarizerError> {
        let summarizer = build_summarizer(&config)?;
        info!(model = summarizer.model_name(), "Summarizer ready");
        Ok(Self::new(config, summarizer))
    }

    #[must_use]
    pub fn summarizer(&self) -> &dyn Summarizer {
        &**self.orchestrator.summarizer()
    }
}

/// Builds the model client selected by the configuration.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built.
pub fn build_summarizer(config: &AppConfig) -> Result<Arc<dyn Summarizer>, SummarizerError> {
    let summarizer: Arc<dyn Summarizer> = match &config.backend {
        SummarizerBackend::HuggingFace { api_url, api_token } => Arc::new(
            HuggingFaceSummarizer::new(api_url.clone(), api_token.clone(), config.model_timeout)?,
        ),
        SummarizerBackend::OpenAi {
            api_key,
            org_id,
            model,
        } => Arc::new(OpenAiSummarizer::new(
            api_key.clone(),
            org_id.clone(),
            model.clone(),
            config.model_timeout,
        )?),
    };
    Ok(summarizer)
}
