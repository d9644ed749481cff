//! Runtime configuration for the controller.

use precis_settings::{ChunkingSettings, SummarizerSettings};

use crate::chunker::ChunkingStrategy;

/// Inputs with fewer words than this are rejected by default.
pub const DEFAULT_MIN_INPUT_WORDS: usize = 10;

/// Length bounds forwarded to the summarization model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModelBounds {
    /// Segment budget (words for sentence packing).
    pub max_tokens: usize,
    /// Lower length bound for each segment summary.
    pub min_length: usize,
}

impl Default for ModelBounds {
    fn default() -> Self {
        Self {
            max_tokens: 150,
            min_length: 10,
        }
    }
}

/// Controller parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct SummarizerConfig {
    /// Converged once the text has at most this many words.
    pub target_length: usize,
    /// Pass budget.
    pub max_iterations: usize,
    /// Minimum words accepted as input.
    pub min_input_words: usize,
    /// Segmentation strategy.
    pub strategy: ChunkingStrategy,
    /// Model bounds.
    pub bounds: ModelBounds,
    /// Segments summarized concurrently within a pass.
    pub concurrency: usize,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            target_length: 150,
            max_iterations: 5,
            min_input_words: DEFAULT_MIN_INPUT_WORDS,
            strategy: ChunkingStrategy::default(),
            bounds: ModelBounds::default(),
            concurrency: 1,
        }
    }
}

impl SummarizerConfig {
    /// Per-segment minimum length, clamped so it never exceeds the target.
    pub fn segment_min_length(&self) -> usize {
        self.bounds.min_length.min(self.target_length)
    }
}

impl From<&ChunkingSettings> for ChunkingStrategy {
    fn from(settings: &ChunkingSettings) -> Self {
        match settings {
            ChunkingSettings::SentencePacking { delimiter } => Self::SentencePacking {
                delimiter: delimiter.clone(),
            },
            ChunkingSettings::FixedWindow { token_factor } => Self::FixedWindow {
                token_factor: *token_factor,
            },
        }
    }
}

impl From<&SummarizerSettings> for SummarizerConfig {
    fn from(settings: &SummarizerSettings) -> Self {
        Self {
            target_length: settings.target_length,
            max_iterations: settings.max_iterations,
            min_input_words: settings.min_input_words,
            strategy: ChunkingStrategy::from(&settings.chunking),
            bounds: ModelBounds {
                max_tokens: settings.max_tokens,
                min_length: settings.segment_min_length,
            },
            concurrency: settings.concurrency.max(1),
        }
    }
}
