//! Greedy, order-preserving splitting of text into model-sized segments.

use std::str::FromStr;

use crate::errors::SummarizerError;

/// How a segment's size is measured against the limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SegmentMeasure {
    /// Each word costs one unit.
    #[default]
    Words,
    /// Each word costs its character count plus one separator.
    Characters,
}

impl SegmentMeasure {
    fn cost(self, word: &str) -> usize {
        match self {
            Self::Words => 1,
            Self::Characters => word.chars().count() + 1,
        }
    }
}

impl FromStr for SegmentMeasure {
    type Err = SummarizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "words" | "word" => Ok(Self::Words),
            "characters" | "chars" => Ok(Self::Characters),
            other => Err(SummarizerError::ConfigError(format!(
                "unknown segment measure '{other}' (expected 'words' or 'characters')"
            ))),
        }
    }
}

/// A contiguous run of the input's words, joined by single spaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Zero-based position in the split.
    pub index: usize,
    pub text: String,
    pub word_count: usize,
}

/// Number of whitespace-separated words in `text`.
#[must_use]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Splits `text` into segments whose measured size does not exceed `limit`.
///
/// Words are packed greedily in arrival order. A single word larger than the
/// limit is never split and becomes a segment of its own. Whitespace-only
/// input yields no segments.
#[must_use]
pub fn segment(text: &str, limit: usize, measure: SegmentMeasure) -> Vec<Segment> {
    let limit = limit.max(1);
    let mut segments = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut running = 0;

    for word in text.split_whitespace() {
        let cost = measure.cost(word);
        if !current.is_empty() && running + cost > limit {
            push_segment(&mut segments, &current);
            current.clear();
            running = 0;
        }
        current.push(word);
        running += cost;
    }

    if !current.is_empty() {
        push_segment(&mut segments, &current);
    }

    segments
}

fn push_segment(segments: &mut Vec<Segment>, words: &[&str]) {
    segments.push(Segment {
        index: segments.len(),
        text: words.join(" "),
        word_count: words.len(),
    });
}
