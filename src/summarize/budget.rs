//! Length budgets handed to the summarization model.
//!
//! Bounds are always derived from the size of the text being summarized, with
//! a separate scaling rule per call site.

use serde::Serialize;

/// `(max_length, min_length)` bounds for one summarization call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LengthBudget {
    pub max_length: usize,
    pub min_length: usize,
}

impl LengthBudget {
    /// Builds a budget, repairing bounds so that `1 <= min_length <= max_length`.
    #[must_use]
    pub fn new(max_length: usize, min_length: usize) -> Self {
        let max_length = max_length.max(1);
        let min_length = min_length.clamp(1, max_length);
        Self {
            max_length,
            min_length,
        }
    }
}

/// Scaling rule turning an input word count into a [`LengthBudget`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetRule {
    pub max_divisor: usize,
    pub max_floor: usize,
    pub max_cap: usize,
    pub min_divisor: usize,
    pub min_floor: usize,
    pub min_cap: usize,
}

impl BudgetRule {
    /// Whole document at or under the segment limit.
    pub const WHOLE_DOCUMENT: Self = Self {
        max_divisor: 2,
        max_floor: 20,
        max_cap: 130,
        min_divisor: 10,
        min_floor: 5,
        min_cap: 10,
    };

    /// One primary segment of a long document.
    pub const SEGMENT: Self = Self {
        max_divisor: 3,
        max_floor: 15,
        max_cap: 80,
        min_divisor: 10,
        min_floor: 5,
        min_cap: 10,
    };

    /// A smaller piece produced after a primary segment failed.
    pub const DEGRADED_SEGMENT: Self = Self {
        max_divisor: 4,
        max_floor: 10,
        max_cap: 50,
        min_divisor: 15,
        min_floor: 3,
        min_cap: 5,
    };

    /// Compression of an over-long combined summary.
    pub const FINAL_PASS: Self = Self {
        max_divisor: 2,
        max_floor: 30,
        max_cap: 130,
        min_divisor: 10,
        min_floor: 10,
        min_cap: 20,
    };

    /// Derives the budget for a text of `word_count` words.
    #[must_use]
    pub fn derive(&self, word_count: usize) -> LengthBudget {
        let max_length = scale(word_count, self.max_divisor, self.max_floor, self.max_cap);
        let min_length = scale(word_count, self.min_divisor, self.min_floor, self.min_cap);
        LengthBudget::new(max_length, min_length)
    }
}

fn scale(word_count: usize, divisor: usize, floor: usize, cap: usize) -> usize {
    let floor = floor.max(1);
    let cap = cap.max(floor);
    (word_count / divisor.max(1)).clamp(floor, cap)
}
