//! Segments and their per-segment summaries.

use serde::Serialize;

use crate::errors::SegmentFailure;

/// A contiguous slice of one pass's text, produced by a chunker.
///
/// `content` is the exact slice of the source text, including any
/// surrounding whitespace or delimiter, so that concatenating every segment
/// of a pass in order reproduces the pass input byte for byte.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    /// Exact slice of the pass text.
    pub content: String,
    /// Position within the current pass (0-based).
    pub sequence_index: usize,
    /// Size in the strategy's unit (words for sentence packing, characters
    /// for fixed windows).
    pub estimated_size: usize,
}

impl Segment {
    /// Create a segment.
    pub fn new(content: impl Into<String>, sequence_index: usize, estimated_size: usize) -> Self {
        Self {
            content: content.into(),
            sequence_index,
            estimated_size,
        }
    }

    /// Content with surrounding whitespace removed, as sent to a model.
    #[must_use]
    pub fn text(&self) -> &str {
        self.content.trim()
    }
}

/// Result of one segment's model call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SegmentOutcome {
    /// The model produced a summary.
    Summarized(String),
    /// The model call failed; the segment contributes nothing to the join.
    Failed(SegmentFailure),
}

/// Summary of a single segment, tagged with the segment it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SegmentSummary {
    /// Index of the source segment within its pass.
    pub source_segment_index: usize,
    /// What the model call produced.
    pub outcome: SegmentOutcome,
}

impl SegmentSummary {
    /// A successful summary.
    pub fn summarized(source_segment_index: usize, text: impl Into<String>) -> Self {
        Self {
            source_segment_index,
            outcome: SegmentOutcome::Summarized(text.into()),
        }
    }

    /// A failed summary.
    pub fn failed(failure: SegmentFailure) -> Self {
        Self {
            source_segment_index: failure.segment,
            outcome: SegmentOutcome::Failed(failure),
        }
    }

    /// Summary text, or `None` when the call failed.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        match &self.outcome {
            SegmentOutcome::Summarized(text) => Some(text.as_str()),
            SegmentOutcome::Failed(_) => None,
        }
    }

    /// Whether the model call failed.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, SegmentOutcome::Failed(_))
    }
}
