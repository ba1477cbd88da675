use thiserror::Error;

#[derive(Debug, Error)]
pub enum SummarizerError {
    #[error("Summarization model error: {0}")]
    ModelError(String),

    #[error("Summarization model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("Failed to extract PDF text: {0}")]
    PdfError(String),

    #[error("Invalid upload: {0}")]
    ValidationError(String),

    #[error("PDF file must not exceed {}", format_size(.0))]
    PayloadTooLarge(usize),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

impl SummarizerError {
    /// Whether a model call failing with this error is worth retrying as-is.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::ModelUnavailable(_))
    }

    /// HTTP status code the request layer answers with for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::ValidationError(_) | Self::PayloadTooLarge(_) => 400,
            Self::ModelUnavailable(_) => 503,
            _ => 500,
        }
    }
}

fn format_size(bytes: &usize) -> String {
    const MIB: usize = 1024 * 1024;
    let bytes = *bytes;
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{} MB", bytes / MIB)
    } else {
        format!("{bytes} bytes")
    }
}

impl From<reqwest::Error> for SummarizerError {
    fn from(error: reqwest::Error) -> Self {
        SummarizerError::HttpError(error.to_string())
    }
}

impl From<anyhow::Error> for SummarizerError {
    fn from(error: anyhow::Error) -> Self {
        SummarizerError::ConfigError(error.to_string())
    }
}

impl From<url::ParseError> for SummarizerError {
    fn from(error: url::ParseError) -> Self {
        SummarizerError::ConfigError(format!("invalid URL: {error}"))
    }
}
