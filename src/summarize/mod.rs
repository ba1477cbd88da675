//! Chunked summarization of arbitrarily long document text.

pub mod budget;
pub mod orchestrator;
pub mod segmenter;

pub use budget::{BudgetRule, LengthBudget};
pub use orchestrator::{
    FAILURE_PREFIX, Orchestrator, Strategy, SummarizationPolicy, SummaryReport,
    segment_placeholder,
};
pub use segmenter::{Segment, SegmentMeasure, segment, word_count};
