//! Long-text summarization: segment, summarize with fallback, recombine,
//! and compress once more when the combined result is still too long.

use serde::Serialize;
use tracing::{debug, error, info, warn};

use super::budget::BudgetRule;
use super::segmenter::{Segment, SegmentMeasure, segment, word_count};
use crate::ai::Summarizer;
use crate::errors::SummarizerError;

/// Prefix of the result returned when a short document cannot be summarized.
pub const FAILURE_PREFIX: &str = "Summarization failed";

/// Placeholder emitted for a segment once every fallback has failed.
#[must_use]
pub fn segment_placeholder(ordinal: usize) -> String {
    format!("Segment {ordinal} too complex to summarize.")
}

/// Segment sizes used by the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummarizationPolicy {
    /// Documents (and combined summaries) above this many words are split.
    pub segment_limit: usize,
    /// Limit used to re-split a segment whose primary attempt failed.
    pub degraded_limit: usize,
    pub measure: SegmentMeasure,
}

impl Default for SummarizationPolicy {
    fn default() -> Self {
        Self {
            segment_limit: 500,
            degraded_limit: 300,
            measure: SegmentMeasure::Words,
        }
    }
}

/// Which path through the orchestrator produced the summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Nothing to summarize; the model was not called.
    Empty,
    /// Short document summarized in one call.
    Direct,
    /// Short document whose single call failed; the summary is a failure message.
    DirectFailed,
    /// Segment summaries joined together.
    Combined,
    /// Combined summary compressed by a final pass.
    Compressed,
    /// Final pass failed; the combined summary is returned unreduced.
    CompressionFailed,
}

/// The summary together with how it was obtained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryReport {
    pub summary: String,
    pub strategy: Strategy,
    pub segment_count: usize,
    /// One-based ordinals of segments that ended in a placeholder.
    pub failed_segments: Vec<usize>,
    pub model_calls: usize,
}

/// Result of the degradation ladder for one segment.
struct SegmentOutcome {
    summary: String,
    /// Set when the segment text ends with its placeholder.
    failed: bool,
}

/// Drives a [`Summarizer`] over documents of any length.
///
/// Segments are summarized one at a time in document order. No model failure
/// ever escapes: every path resolves to a string.
#[derive(Debug, Clone)]
pub struct Orchestrator<S> {
    summarizer: S,
    policy: SummarizationPolicy,
}

impl<S: Summarizer> Orchestrator<S> {
    #[must_use]
    pub fn new(summarizer: S) -> Self {
        Self::with_policy(summarizer, SummarizationPolicy::default())
    }

    #[must_use]
    pub fn with_policy(summarizer: S, policy: SummarizationPolicy) -> Self {
        Self { summarizer, policy }
    }

    #[must_use]
    pub fn summarizer(&self) -> &S {
        &self.summarizer
    }

    #[must_use]
    pub fn policy(&self) -> SummarizationPolicy {
        self.policy
    }

    /// Summarizes a whole document. Never fails.
    pub async fn summarize_document(&self, text: &str) -> String {
        self.summarize_document_with_report(text).await.summary
    }

    pub async fn summarize_document_with_report(&self, text: &str) -> SummaryReport {
        let mut calls = 0;
        let words = word_count(text);

        if words == 0 {
            return SummaryReport {
                summary: String::new(),
                strategy: Strategy::Empty,
                segment_count: 0,
                failed_segments: Vec::new(),
                model_calls: 0,
            };
        }

        if words <= self.policy.segment_limit {
            info!(words, "Summarizing short document in a single call");
            let (summary, strategy) = match self
                .call(text.trim(), words, BudgetRule::WHOLE_DOCUMENT, &mut calls)
                .await
            {
                Ok(summary) => (summary, Strategy::Direct),
                Err(e) => {
                    warn!("Direct summarization failed: {}", e);
                    (format!("{FAILURE_PREFIX}: {e}"), Strategy::DirectFailed)
                }
            };
            return SummaryReport {
                summary,
                strategy,
                segment_count: 1,
                failed_segments: Vec::new(),
                model_calls: calls,
            };
        }

        let segments = segment(text, self.policy.segment_limit, self.policy.measure);
        info!(
            words,
            segments = segments.len(),
            "Summarizing long document segment by segment"
        );

        let mut summaries = Vec::with_capacity(segments.len());
        let mut failed_segments = Vec::new();
        for seg in &segments {
            let outcome = self.summarize_segment(seg, segments.len(), &mut calls).await;
            if outcome.failed {
                failed_segments.push(seg.index + 1);
            }
            summaries.push(outcome.summary);
        }

        let combined = summaries.join(" ");
        let combined_words = word_count(&combined);
        let mut report = SummaryReport {
            summary: combined,
            strategy: Strategy::Combined,
            segment_count: segments.len(),
            failed_segments,
            model_calls: 0,
        };

        if combined_words > self.policy.segment_limit {
            info!(
                words = combined_words,
                "Combined summary still too long, compressing once more"
            );
            match self
                .call(&report.summary, combined_words, BudgetRule::FINAL_PASS, &mut calls)
                .await
            {
                Ok(compressed) => {
                    report.summary = compressed;
                    report.strategy = Strategy::Compressed;
                }
                Err(e) => {
                    warn!("Final compression failed, keeping combined summary: {}", e);
                    report.strategy = Strategy::CompressionFailed;
                }
            }
        }

        report.model_calls = calls;
        report
    }

    /// Runs the degradation ladder for one primary segment.
    ///
    /// When a degraded piece fails, the summaries of the pieces before it are
    /// kept and followed by the segment placeholder.
    async fn summarize_segment(
        &self,
        seg: &Segment,
        total: usize,
        calls: &mut usize,
    ) -> SegmentOutcome {
        let ordinal = seg.index + 1;
        match self
            .call(&seg.text, seg.word_count, BudgetRule::SEGMENT, calls)
            .await
        {
            Ok(summary) => {
                info!(segment = ordinal, total, "Segment summarized");
                return SegmentOutcome {
                    summary,
                    failed: false,
                };
            }
            Err(e) => warn!(segment = ordinal, "Segment summarization failed: {}", e),
        }

        let pieces = segment(&seg.text, self.policy.degraded_limit, self.policy.measure);
        let mut piece_summaries = Vec::with_capacity(pieces.len() + 1);
        for piece in &pieces {
            match self
                .call(&piece.text, piece.word_count, BudgetRule::DEGRADED_SEGMENT, calls)
                .await
            {
                Ok(summary) => {
                    debug!(
                        segment = ordinal,
                        piece = piece.index + 1,
                        "Degraded piece summarized"
                    );
                    piece_summaries.push(summary);
                }
                Err(e) => {
                    error!(
                        segment = ordinal,
                        piece = piece.index + 1,
                        kept = piece_summaries.len(),
                        "Degraded summarization failed, giving up on segment: {}",
                        e
                    );
                    piece_summaries.push(segment_placeholder(ordinal));
                    return SegmentOutcome {
                        summary: piece_summaries.join(" "),
                        failed: true,
                    };
                }
            }
        }

        SegmentOutcome {
            summary: piece_summaries.join(" "),
            failed: false,
        }
    }

    async fn call(
        &self,
        text: &str,
        words: usize,
        rule: BudgetRule,
        calls: &mut usize,
    ) -> Result<String, SummarizerError> {
        let budget = rule.derive(words);
        *calls += 1;

        #[cfg(feature = "debug-logs")]
        debug!(?budget, "Model input:\n{}", text);

        let summary = self.summarizer.summarize(text, budget).await?;
        let summary = summary.trim();
        if summary.is_empty() {
            return Err(SummarizerError::ModelError(
                "model returned an empty summary".to_string(),
            ));
        }
        Ok(summary.to_string())
    }
}
