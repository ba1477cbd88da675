use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Body of a successful `POST /summarize_pdf` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
}

/// Body of `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    pub version: String,
    pub model: String,
    pub endpoints: BTreeMap<String, String>,
    pub features: Vec<String>,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    pub timestamp: String,
    pub model: String,
    pub model_status: String,
}

/// A validated PDF upload, ready for text extraction.
#[derive(Debug, Clone)]
pub struct PdfUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}
