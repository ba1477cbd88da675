//! API Lambda handler - thin router over the summarization service.
//!
//! This module handles:
//! - Route and method matching (`/`, `/health`, `/summarize_pdf`)
//! - Upload validation (delegated to `parsing`)
//! - PDF text extraction on a blocking thread
//! - Summarization (delegated to the orchestrator)

use std::time::Instant;

use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::state::AppState;
use super::{helpers, parsing, status};
use crate::core::models::SummaryResponse;
use crate::pdf;
use crate::summarize::word_count;

pub use self::function_handler as handler;

/// Summary returned when the PDF contains no extractable text.
pub const NO_TEXT_MESSAGE: &str = "No text found in the PDF.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Endpoint {
    Root,
    Health,
    SummarizePdf,
}

fn match_endpoint(path: &str) -> Option<Endpoint> {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        Some(Endpoint::Root)
    } else if trimmed.ends_with("/health") {
        Some(Endpoint::Health)
    } else if trimmed.ends_with("/summarize_pdf") {
        Some(Endpoint::SummarizePdf)
    } else {
        None
    }
}

/// Lambda handler for the API entrypoint.
///
/// # Errors
///
/// Never fails in practice: every outcome is encoded as an HTTP response.
pub async fn function_handler(
    state: &AppState,
    event: LambdaEvent<Value>,
) -> Result<Value, Error> {
    Ok(route(state, &event.payload).await)
}

/// Routes one API Gateway event to its endpoint and builds the proxy response.
#[tracing::instrument(level = "info", skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn route(state: &AppState, payload: &Value) -> Value {
    let path = parsing::request_path(payload).unwrap_or("/");
    let method = parsing::request_method(payload)
        .unwrap_or("GET")
        .to_ascii_uppercase();
    info!(raw_path = %path, method = %method, "Request received");

    let Some(endpoint) = match_endpoint(path) else {
        warn!(raw_path = %path, "Unknown route");
        return helpers::err_response(404, "Not Found");
    };

    match (endpoint, method.as_str()) {
        (Endpoint::Root, "GET") => {
            helpers::ok_json(&status::service_info(state.summarizer().model_name()))
        }
        (Endpoint::Health, "GET") => {
            helpers::ok_json(&status::health_check(state.summarizer()).await)
        }
        (Endpoint::SummarizePdf, "POST") => handle_summarize_pdf(state, payload).await,
        _ => {
            warn!(raw_path = %path, method = %method, "Method not allowed");
            helpers::err_response(405, "Method Not Allowed")
        }
    }
}

async fn handle_summarize_pdf(state: &AppState, payload: &Value) -> Value {
    let start = Instant::now();

    let upload = match parsing::parse_upload(payload, state.config.max_upload_bytes) {
        Ok(upload) => upload,
        Err(e) => {
            warn!("Rejected upload: {}", e);
            return helpers::err_response(e.status_code(), &e.to_string());
        }
    };

    #[allow(clippy::cast_precision_loss)]
    let size_mb = upload.bytes.len() as f64 / (1024.0 * 1024.0);
    info!(filename = %upload.filename, size_mb, "Received PDF upload");

    let bytes = upload.bytes;
    let text = match tokio::task::spawn_blocking(move || pdf::extract_text(&bytes)).await {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            error!(
                elapsed_secs = start.elapsed().as_secs_f64(),
                "PDF extraction failed: {}", e
            );
            return helpers::err_response(500, &format!("Internal error: {e}"));
        }
        Err(e) => {
            error!("PDF extraction task failed: {}", e);
            return helpers::err_response(500, &format!("Internal error: {e}"));
        }
    };

    if text.trim().is_empty() {
        warn!(filename = %upload.filename, "No text found in PDF");
        return helpers::ok_json(&SummaryResponse {
            summary: NO_TEXT_MESSAGE.to_string(),
        });
    }

    info!(words = word_count(&text), "Text extracted, generating summary");
    let report = state.orchestrator.summarize_document_with_report(&text).await;

    info!(
        elapsed_secs = start.elapsed().as_secs_f64(),
        summary_words = word_count(&report.summary),
        strategy = ?report.strategy,
        segments = report.segment_count,
        failed_segments = ?report.failed_segments,
        model_calls = report.model_calls,
        "Summary generated"
    );

    helpers::ok_json(&SummaryResponse {
        summary: report.summary,
    })
}
