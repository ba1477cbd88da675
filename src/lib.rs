//! PDF Summarizer - an API Lambda that extracts the text of an uploaded PDF
//! and returns a bounded-length summary.
//!
//! # Architecture
//!
//! - `summarize` holds the long-text orchestrator: documents over the segment
//!   limit are split into segments, each summarized with a fallback to smaller
//!   pieces, then recombined and compressed once more if still too long
//! - `ai` defines the [`ai::Summarizer`] capability and its Hugging Face and
//!   `OpenAI` clients
//! - `pdf` extracts plain text with `pdf-extract`
//! - `api` routes API Gateway events (`/`, `/health`, `/summarize_pdf`)
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use pdf_summarizer::ai::HuggingFaceSummarizer;
//! use pdf_summarizer::summarize::Orchestrator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     pdf_summarizer::setup_logging();
//!
//!     let summarizer = HuggingFaceSummarizer::new(
//!         url::Url::parse(pdf_summarizer::core::config::DEFAULT_HF_API_URL)?,
//!         std::env::var("HF_API_TOKEN").ok(),
//!         Duration::from_secs(120),
//!     )?;
//!     let orchestrator = Orchestrator::new(summarizer);
//!
//!     let bytes = std::fs::read("report.pdf")?;
//!     let text = pdf_summarizer::pdf::extract_text(&bytes)?;
//!     println!("{}", orchestrator.summarize_document(&text).await);
//!     Ok(())
//! }
//! ```

pub mod ai;
pub mod api;
pub mod core;
pub mod errors;
pub mod pdf;
pub mod summarize;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// This function sets up tracing-subscriber with a JSON formatter suitable for
/// `CloudWatch` Logs integration. Calling it more than once is harmless.
///
/// # Example
///
/// ```
/// pdf_summarizer::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}
