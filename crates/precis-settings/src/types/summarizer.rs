//! Summarization controller settings.

use serde::{Deserialize, Serialize};

/// Controller and chunking settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SummarizerSettings {
    /// Word count at or below which the summary is considered converged.
    pub target_length: usize,
    /// Maximum number of chunk, summarize, combine passes.
    pub max_iterations: usize,
    /// Inputs with fewer words are rejected.
    pub min_input_words: usize,
    /// Lower length bound passed to the model for each segment.
    pub segment_min_length: usize,
    /// Segment budget in tokens (words, for sentence packing).
    pub max_tokens: usize,
    /// Segments summarized concurrently within one pass (1 = sequential).
    pub concurrency: usize,
    /// Segmentation strategy.
    pub chunking: ChunkingSettings,
}

impl Default for SummarizerSettings {
    fn default() -> Self {
        Self {
            target_length: 150,
            max_iterations: 5,
            min_input_words: 10,
            segment_min_length: 10,
            max_tokens: 150,
            concurrency: 1,
            chunking: ChunkingSettings::default(),
        }
    }
}

/// Segmentation strategy, tagged by `strategy`.
///
/// ```json
/// {"strategy": "sentencePacking", "delimiter": ". "}
/// {"strategy": "fixedWindow", "tokenFactor": 4.0}
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ChunkingSettings {
    /// Pack whole sentences greedily up to the word budget.
    SentencePacking {
        /// Sentence boundary.
        #[serde(default = "default_delimiter")]
        delimiter: String,
    },
    /// Fixed character windows of `max_tokens * token_factor` characters.
    FixedWindow {
        /// Characters per token.
        #[serde(default = "default_token_factor")]
        token_factor: f64,
    },
}

impl Default for ChunkingSettings {
    fn default() -> Self {
        Self::SentencePacking {
            delimiter: default_delimiter(),
        }
    }
}

fn default_delimiter() -> String {
    ". ".to_string()
}

/// Characters per token assumed by the fixed-window strategy.
pub const DEFAULT_TOKEN_FACTOR: f64 = 4.0;

fn default_token_factor() -> f64 {
    DEFAULT_TOKEN_FACTOR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunking_tag_roundtrip() {
        let json = serde_json::to_value(ChunkingSettings::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"strategy": "sentencePacking", "delimiter": ". "})
        );
    }

    #[test]
    fn fixed_window_defaults_token_factor() {
        let parsed: ChunkingSettings =
            serde_json::from_value(serde_json::json!({"strategy": "fixedWindow"})).unwrap();
        assert_eq!(parsed, ChunkingSettings::FixedWindow { token_factor: 4.0 });
    }

    #[test]
    fn unknown_strategy_is_rejected() {
        let parsed: Result<ChunkingSettings, _> =
            serde_json::from_value(serde_json::json!({"strategy": "paragraphs"}));
        assert!(parsed.is_err());
    }
}
