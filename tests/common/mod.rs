#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use pdf_summarizer::ai::Summarizer;
use pdf_summarizer::errors::SummarizerError;
use pdf_summarizer::summarize::LengthBudget;

type Behaviour = dyn Fn(&str, LengthBudget) -> Result<String, SummarizerError> + Send + Sync;

/// Deterministic summarizer recording every call it receives.
pub struct StubSummarizer {
    behaviour: Box<Behaviour>,
    calls: Mutex<Vec<(String, LengthBudget)>>,
}

impl StubSummarizer {
    pub fn new<F>(behaviour: F) -> Self
    where
        F: Fn(&str, LengthBudget) -> Result<String, SummarizerError> + Send + Sync + 'static,
    {
        Self {
            behaviour: Box::new(behaviour),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Keeps the first `max_length` words of its input.
    pub fn truncating() -> Self {
        Self::new(|text, budget| Ok(first_words(text, budget.max_length)))
    }

    /// Returns its input unchanged.
    pub fn echo() -> Self {
        Self::new(|text, _| Ok(text.to_string()))
    }

    pub fn failing() -> Self {
        Self::new(|_, _| Err(SummarizerError::ModelError("model exploded".to_string())))
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<(String, LengthBudget)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Summarizer for StubSummarizer {
    async fn summarize(&self, text: &str, budget: LengthBudget) -> Result<String, SummarizerError> {
        self.calls.lock().unwrap().push((text.to_string(), budget));
        (self.behaviour)(text, budget)
    }

    fn model_name(&self) -> &str {
        "stub-model"
    }
}

pub fn first_words(text: &str, n: usize) -> String {
    text.split_whitespace().take(n).collect::<Vec<_>>().join(" ")
}

/// `w0 w1 ... w{n-1}`
pub fn numbered_words(n: usize) -> String {
    (0..n).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ")
}

/// Builds a one-page PDF showing `lines` in Helvetica.
pub fn minimal_pdf(lines: &[&str]) -> Vec<u8> {
    let mut content = String::new();
    if !lines.is_empty() {
        content.push_str("BT /F1 12 Tf 72 720 Td 14 TL\n");
        for line in lines {
            content.push_str(&format!("({line}) Tj T*\n"));
        }
        content.push_str("ET\n");
    }

    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents 4 0 R \
         /Resources << /Font << /F1 5 0 R >> >> >>"
            .to_string(),
        format!(
            "<< /Length {} >>\nstream\n{}endstream",
            content.len(),
            content
        ),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
    ];

    let mut pdf = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
    }

    let xref_offset = pdf.len();
    let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in offsets {
        xref.push_str(&format!("{offset:010} 00000 n \n"));
    }
    xref.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        xref_offset
    ));
    pdf.extend_from_slice(xref.as_bytes());
    pdf
}
