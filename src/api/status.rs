//! Informational routes: service description and health probe.

use std::collections::BTreeMap;

use tracing::{error, info};

use crate::ai::Summarizer;
use crate::core::models::{HealthReport, ServiceInfo};
use crate::summarize::LengthBudget;

const HEALTH_PROBE_TEXT: &str = "This is a comprehensive test of the summarization model \
     to ensure it works properly with appropriate parameters.";

#[must_use]
pub fn service_info(model: &str) -> ServiceInfo {
    let endpoints = [
        ("summarize_pdf", "/summarize_pdf"),
        ("health", "/health"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect::<BTreeMap<_, _>>();

    ServiceInfo {
        message: "PDF summarization API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model: model.to_string(),
        endpoints,
        features: vec![
            "PDF text extraction".to_string(),
            "Automatic summarization".to_string(),
            "Long document segmentation".to_string(),
            "Per-segment failure recovery".to_string(),
        ],
    }
}

/// Probes the model with a short sentence. Model failures are reported in the
/// body rather than as an error.
pub async fn health_check<S: Summarizer + ?Sized>(summarizer: &S) -> HealthReport {
    let model_status = match summarizer
        .summarize(HEALTH_PROBE_TEXT, LengthBudget::new(20, 5))
        .await
    {
        Ok(_) => {
            info!("Model health probe succeeded");
            "ok".to_string()
        }
        Err(e) => {
            error!("Model health probe failed: {}", e);
            format!("error: {e}")
        }
    };

    HealthReport {
        status: "online".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        model: summarizer.model_name().to_string(),
        model_status,
    }
}
