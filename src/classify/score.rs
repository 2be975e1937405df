//! # Word-Count Complexity Scoring
//!
//! Implements the complexity decision rule: a document whose whitespace-
//! delimited word count exceeds [`crate::WORD_COUNT_THRESHOLD`] is `complex`,
//! everything else is `simple`. The rule is a pure function of the input
//! text; the scorer only adds an operation counter for observability.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Binary complexity label derived from the word-count threshold
///
/// Serialized lowercase (`"simple"` / `"complex"`) to match the wire format
/// of the process envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    /// Word count at or below the threshold (includes the empty document)
    Simple,
    /// Word count strictly above the threshold
    Complex,
}

impl Complexity {
    /// Returns the lowercase wire label for this score
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Complex => "complex",
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Count whitespace-delimited words in `text`
///
/// Splits on runs of Unicode whitespace and discards empty tokens, so
/// leading/trailing whitespace and repeated separators never produce
/// phantom words. The empty document counts zero words.
#[must_use]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Word-count scorer with a fixed decision threshold
///
/// The threshold is taken from [`crate::WORD_COUNT_THRESHOLD`] at
/// construction and never changes; a count of exactly the threshold is
/// `simple`, one more is `complex`.
#[derive(Debug)]
pub struct ComplexityScorer {
    /// Word-count threshold for the `complex` label
    threshold: usize,
    /// Number of scoring operations performed
    operation_count: AtomicU64,
}

impl ComplexityScorer {
    /// Create a new scorer using the crate-wide threshold
    #[must_use]
    pub fn new() -> Self {
        Self {
            threshold: crate::WORD_COUNT_THRESHOLD,
            operation_count: AtomicU64::new(0),
        }
    }

    /// Score a document by its whitespace-delimited word count
    ///
    /// ## Parameters
    /// - `text`: Document text, unconstrained in length
    ///
    /// ## Returns
    /// Returns [`Complexity::Complex`] iff the word count strictly exceeds
    /// the threshold
    pub fn score(&self, text: &str) -> Complexity {
        self.operation_count.fetch_add(1, Ordering::Relaxed);

        if word_count(text) > self.threshold {
            Complexity::Complex
        } else {
            Complexity::Simple
        }
    }

    /// Number of scoring operations performed since startup
    #[must_use]
    pub fn get_operation_count(&self) -> u64 {
        self.operation_count.load(Ordering::Relaxed)
    }
}

impl Default for ComplexityScorer {
    fn default() -> Self {
        Self::new()
    }
}
