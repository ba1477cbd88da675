use std::env;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

use crate::errors::SummarizerError;
use crate::summarize::{SegmentMeasure, SummarizationPolicy};

pub const DEFAULT_HF_API_URL: &str =
    "https://api-inference.huggingface.co/models/facebook/bart-large-cnn";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
const DEFAULT_MODEL_TIMEOUT_SECS: u64 = 120;

/// Which model client backs the summarization capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummarizerBackend {
    HuggingFace {
        api_url: Url,
        api_token: Option<String>,
    },
    OpenAi {
        api_key: String,
        org_id: Option<String>,
        model: String,
    },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend: SummarizerBackend,
    pub model_timeout: Duration,
    pub max_upload_bytes: usize,
    pub policy: SummarizationPolicy,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, SummarizerError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SummarizerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let backend_name = var("SUMMARIZER_BACKEND").unwrap_or_else(|| "huggingface".to_string());
        let backend = match backend_name.trim().to_ascii_lowercase().as_str() {
            "huggingface" | "hf" => SummarizerBackend::HuggingFace {
                api_url: Url::parse(
                    &var("HF_API_URL").unwrap_or_else(|| DEFAULT_HF_API_URL.to_string()),
                )?,
                api_token: var("HF_API_TOKEN"),
            },
            "openai" => SummarizerBackend::OpenAi {
                api_key: var("OPENAI_API_KEY").ok_or_else(|| {
                    SummarizerError::ConfigError(
                        "OPENAI_API_KEY is required when SUMMARIZER_BACKEND=openai".to_string(),
                    )
                })?,
                org_id: var("OPENAI_ORG_ID"),
                model: var("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            },
            other => {
                return Err(SummarizerError::ConfigError(format!(
                    "SUMMARIZER_BACKEND: unknown backend '{other}'"
                )));
            }
        };

        let defaults = SummarizationPolicy::default();
        let policy = SummarizationPolicy {
            segment_limit: parse_var(&var, "SEGMENT_WORD_LIMIT", defaults.segment_limit)?,
            degraded_limit: parse_var(
                &var,
                "DEGRADED_SEGMENT_WORD_LIMIT",
                defaults.degraded_limit,
            )?,
            measure: parse_var(&var, "SEGMENT_MEASURE", SegmentMeasure::Words)?,
        };
        if policy.segment_limit == 0 || policy.degraded_limit == 0 {
            return Err(SummarizerError::ConfigError(
                "segment limits must be positive".to_string(),
            ));
        }
        if policy.degraded_limit >= policy.segment_limit {
            return Err(SummarizerError::ConfigError(format!(
                "DEGRADED_SEGMENT_WORD_LIMIT ({}) must be smaller than SEGMENT_WORD_LIMIT ({})",
                policy.degraded_limit, policy.segment_limit
            )));
        }

        Ok(Self {
            backend,
            model_timeout: Duration::from_secs(parse_var(
                &var,
                "MODEL_TIMEOUT_SECS",
                DEFAULT_MODEL_TIMEOUT_SECS,
            )?),
            max_upload_bytes: parse_var(&var, "MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            policy,
        })
    }
}

fn parse_var<T, F>(var: &F, key: &str, default: T) -> Result<T, SummarizerError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| SummarizerError::ConfigError(format!("{key}: {e}"))),
        None => Ok(default),
    }
}
