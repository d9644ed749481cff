//! Iterative summarization controller.
//!
//! Repeats chunk → summarize → combine until the combined text is within
//! the target length, the pass budget is spent, or a pass produces nothing.
//!
//! ## Termination
//!
//! - [`Termination::Converged`]: word count ≤ `target_length` (including
//!   input that was already short enough, which takes zero passes).
//! - [`Termination::Exhausted`]: `max_iterations` passes ran and the text is
//!   still over target. A warning is logged and the text is returned
//!   anyway.
//! - [`Termination::Stalled`]: every segment of a pass that was sent to the
//!   model failed. The previous text is kept rather than replaced by an
//!   empty join.
//!
//! The text is re-chunked on every pass, so segment boundaries follow the
//! shrinking text. Worst-case model calls are bounded by
//! `max_iterations × segments_per_pass`.
//!
//! Only [`InvalidInputError`] is ever returned; segment failures are
//! absorbed by [`SegmentSummarizer`] and counted in the [`Summary`].

use std::sync::Arc;

use futures::StreamExt;
use futures::stream;
use precis_core::{
    Document, InvalidInputError, Segment, SegmentSummary, SummarizationModel, char_count,
    word_count,
};
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};

use crate::chunker::Chunker;
use crate::config::SummarizerConfig;
use crate::segment::SegmentSummarizer;
use crate::state::{IterationState, Termination};

/// Shown in place of a summary when the controller rejects its input.
pub const SUMMARY_FAILED: &str = "Summarization failed";

/// Final result of a controller run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Combined summary text.
    pub text: String,
    /// How the loop ended.
    pub termination: Termination,
    /// Completed passes.
    pub iterations: usize,
    /// Word count of `text`.
    pub word_count: usize,
    /// Word count of the input.
    pub source_word_count: usize,
    /// Character count of the input.
    pub source_char_count: usize,
    /// Segment model calls that failed across all passes.
    pub failed_segments: usize,
}

impl Summary {
    /// Character-level size reduction relative to the input, in percent.
    pub fn compression_percent(&self) -> f64 {
        if self.source_char_count == 0 {
            return 0.0;
        }
        (1.0 - char_count(&self.text) as f64 / self.source_char_count as f64) * 100.0
    }

    /// Whether the result is within the requested length.
    pub fn is_converged(&self) -> bool {
        self.termination == Termination::Converged
    }

    /// Consume into the summary text.
    pub fn into_text(self) -> String {
        self.text
    }
}

/// Reject input that cannot be meaningfully summarized.
///
/// Returns the input's word count on success.
pub fn validate_input(text: &str, min_words: usize) -> Result<usize, InvalidInputError> {
    if text.trim().is_empty() {
        return Err(InvalidInputError::Empty);
    }
    let words = word_count(text);
    if words < min_words {
        return Err(InvalidInputError::TooShort {
            words,
            min_words,
        });
    }
    Ok(words)
}

/// Drives repeated summarization passes over a [`SummarizationModel`].
///
/// Holds no per-run state; concurrent calls to [`summarize`](Self::summarize)
/// are independent.
#[derive(Debug)]
pub struct IterativeSummarizer {
    chunker: Chunker,
    segments: SegmentSummarizer,
    config: SummarizerConfig,
}

impl IterativeSummarizer {
    /// Create a controller over `model`.
    pub fn new(model: Arc<dyn SummarizationModel>, config: SummarizerConfig) -> Self {
        Self {
            chunker: Chunker::new(config.strategy.clone()),
            segments: SegmentSummarizer::new(model),
            config,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &SummarizerConfig {
        &self.config
    }

    /// Summarize a [`Document`].
    pub async fn summarize_document(
        &self,
        document: &Document,
    ) -> Result<Summary, InvalidInputError> {
        self.summarize(document.raw_text()).await
    }

    /// Summarize `text` down to the configured target length.
    #[instrument(
        skip_all,
        fields(
            target_length = self.config.target_length,
            max_iterations = self.config.max_iterations,
        )
    )]
    pub async fn summarize(&self, text: &str) -> Result<Summary, InvalidInputError> {
        let source_word_count = validate_input(text, self.config.min_input_words)?;
        let target = self.config.target_length;
        let mut state = IterationState::new(text);
        let mut failed_segments = 0;

        let termination = loop {
            if state.is_within(target) {
                break Termination::Converged;
            }
            if state.iteration_number >= self.config.max_iterations {
                warn!(
                    iterations = state.iteration_number,
                    word_count = state.current_word_count,
                    target_length = target,
                    "maximum iterations reached; summary may exceed the target length"
                );
                break Termination::Exhausted;
            }

            let segments = self
                .chunker
                .chunk(&state.current_text, self.config.bounds.max_tokens);
            if segments.is_empty() {
                break Termination::Converged;
            }

            let summaries = self.summarize_pass(&segments).await;
            let failures = summaries.iter().filter(|s| s.is_failed()).count();
            failed_segments += failures;
            // Blank segments never reach the model, so they cannot vouch for it.
            let attempted = segments.iter().filter(|s| !s.text().is_empty()).count();
            if failures == attempted {
                warn!(
                    iteration = state.iteration_number + 1,
                    segments = segments.len(),
                    failed = failures,
                    "every model call failed; keeping previous text"
                );
                break Termination::Stalled;
            }

            let words_before = state.current_word_count;
            state.advance(join_summaries(&summaries));
            info!(
                iteration = state.iteration_number,
                segments = segments.len(),
                failed = failures,
                words_before,
                words_after = state.current_word_count,
                "summarization pass complete"
            );
        };

        debug!(
            %termination,
            iterations = state.iteration_number,
            word_count = state.current_word_count,
            "summarization finished"
        );

        Ok(Summary {
            word_count: state.current_word_count,
            iterations: state.iteration_number,
            text: state.current_text,
            termination,
            source_word_count,
            source_char_count: char_count(text),
            failed_segments,
        })
    }

    /// Summarize every segment of one pass, preserving segment order.
    async fn summarize_pass(&self, segments: &[Segment]) -> Vec<SegmentSummary> {
        let min_length = self.config.segment_min_length();
        let max_length = self.config.target_length;
        stream::iter(segments)
            .map(|segment| {
                self.segments
                    .summarize_segment(segment, min_length, max_length)
            })
            .buffered(self.config.concurrency.max(1))
            .collect()
            .await
    }
}

/// Join successful summaries with single spaces in segment order.
///
/// Failed and empty summaries contribute nothing.
pub fn join_summaries(summaries: &[SegmentSummary]) -> String {
    summaries
        .iter()
        .filter_map(SegmentSummary::content)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Summarize `text`, or return [`SUMMARY_FAILED`] if the input is rejected.
pub async fn summarize_or_fallback(summarizer: &IterativeSummarizer, text: &str) -> String {
    match summarizer.summarize(text).await {
        Ok(summary) => summary.into_text(),
        Err(err) => {
            error!(error = %err, "summarization failed");
            SUMMARY_FAILED.to_string()
        }
    }
}
