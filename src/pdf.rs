//! PDF text extraction.
//!
//! `pdf_extract` can panic on malformed input instead of returning an error,
//! so calls are wrapped in [`std::panic::catch_unwind`].

use std::panic::{self, AssertUnwindSafe};

use tracing::{info, warn};

use crate::errors::SummarizerError;

/// Extracts the plain text of every page of the PDF in `bytes`.
///
/// Control characters other than whitespace (form feeds between pages
/// included) are replaced by spaces or newlines.
///
/// # Errors
///
/// Returns [`SummarizerError::PdfError`] when the document cannot be parsed.
pub fn extract_text(bytes: &[u8]) -> Result<String, SummarizerError> {
    if !bytes.starts_with(b"%PDF") {
        return Err(SummarizerError::PdfError(
            "input does not look like a PDF document".to_string(),
        ));
    }

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem(bytes)
    }));
    let raw = match result {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => return Err(SummarizerError::PdfError(e.to_string())),
        Err(_) => {
            warn!("pdf_extract panicked on malformed document");
            return Err(SummarizerError::PdfError(
                "malformed PDF document".to_string(),
            ));
        }
    };

    let text = clean_text(&raw);
    info!(
        bytes = bytes.len(),
        chars = text.chars().count(),
        "Extracted PDF text"
    );
    Ok(text)
}

fn clean_text(raw: &str) -> String {
    raw.chars()
        .map(|c| match c {
            '\u{000C}' => '\n',
            c if c.is_control() && !c.is_whitespace() => ' ',
            c => c,
        })
        .collect()
}
