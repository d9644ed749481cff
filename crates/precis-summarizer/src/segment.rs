//! Per-segment summarization with failure isolation.
//!
//! A model error never escapes [`SegmentSummarizer::summarize_segment`]: it
//! becomes a [`SegmentOutcome::Failed`](precis_core::SegmentOutcome) entry
//! and a warn event, so one bad segment leaves a gap in the pass output
//! instead of aborting it.

use std::sync::Arc;

use precis_core::{Segment, SegmentFailure, SegmentSummary, SummarizationModel};
use tracing::{trace, warn};

/// Wraps a [`SummarizationModel`] and converts its errors into segment outcomes.
#[derive(Clone)]
pub struct SegmentSummarizer {
    model: Arc<dyn SummarizationModel>,
}

impl SegmentSummarizer {
    /// Create a segment summarizer over `model`.
    pub fn new(model: Arc<dyn SummarizationModel>) -> Self {
        Self { model }
    }

    /// Summarize one segment within `min_length..=max_length` words.
    ///
    /// Blank segments are answered with an empty summary without calling
    /// the model. Returned text is trimmed.
    pub async fn summarize_segment(
        &self,
        segment: &Segment,
        min_length: usize,
        max_length: usize,
    ) -> SegmentSummary {
        let index = segment.sequence_index;
        let text = segment.text();
        if text.is_empty() {
            trace!(segment = index, "blank segment, skipping model call");
            return SegmentSummary::summarized(index, "");
        }

        match self.model.summarize(text, min_length, max_length).await {
            Ok(summary) => {
                trace!(
                    segment = index,
                    input_chars = text.len(),
                    output_chars = summary.len(),
                    "segment summarized"
                );
                SegmentSummary::summarized(index, summary.trim())
            }
            Err(error) => {
                warn!(
                    segment = index,
                    category = error.category(),
                    error = %error,
                    "failed to summarize segment"
                );
                SegmentSummary::failed(SegmentFailure {
                    segment: index,
                    error,
                })
            }
        }
    }
}

impl std::fmt::Debug for SegmentSummarizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SegmentSummarizer").finish_non_exhaustive()
    }
}
