//! # precis-summarizer
//!
//! Iterative summarization of long text:
//!
//! - [`Chunker`] splits text into bounded, ordered segments
//! - [`SegmentSummarizer`] summarizes one segment and absorbs model failures
//! - [`IterativeSummarizer`] repeats chunk → summarize → combine until the
//!   text fits the target length or the pass budget runs out
//!
//! The summarization model is injected as an `Arc<dyn SummarizationModel>`.

#![deny(unsafe_code)]

pub mod chunker;
pub mod config;
pub mod controller;
pub mod segment;
pub mod state;

pub use chunker::{Chunker, ChunkingStrategy, window_chars};
pub use config::{DEFAULT_MIN_INPUT_WORDS, ModelBounds, SummarizerConfig};
pub use controller::{
    IterativeSummarizer, SUMMARY_FAILED, Summary, join_summaries, summarize_or_fallback,
    validate_input,
};
pub use segment::SegmentSummarizer;
pub use state::{IterationState, Termination};
