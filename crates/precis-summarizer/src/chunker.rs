//! Text chunking.
//!
//! Both strategies produce segments that are exact, contiguous slices of
//! the input: concatenating `content` in order reproduces the input, with
//! no gaps and no overlap. Empty input yields no segments.
//!
//! ## Sentence packing
//!
//! The text is cut after every occurrence of the delimiter (the delimiter
//! stays with the sentence it ends). Sentences are appended to a buffer
//! until the next word-bearing sentence would push the buffer over
//! `max_tokens` words; the buffer is then sealed and a new one starts with
//! that sentence. A sentence that alone exceeds the budget becomes its own
//! oversized segment rather than being cut.
//!
//! ## Fixed window
//!
//! The token budget becomes a character budget
//! (`max_tokens * token_factor`) and the text is sliced into consecutive
//! windows of that many characters, ignoring sentence boundaries.

use precis_core::{Segment, char_count, word_count};
use tracing::debug;

/// Segmentation strategy.
#[derive(Clone, Debug, PartialEq)]
pub enum ChunkingStrategy {
    /// Greedy sentence packing by word count.
    SentencePacking {
        /// Sentence boundary, e.g. `". "`.
        delimiter: String,
    },
    /// Fixed-size character windows.
    FixedWindow {
        /// Characters per token used to convert the budget.
        token_factor: f64,
    },
}

impl Default for ChunkingStrategy {
    fn default() -> Self {
        Self::SentencePacking {
            delimiter: ". ".to_string(),
        }
    }
}

/// Splits text into bounded segments with one [`ChunkingStrategy`].
#[derive(Clone, Debug, Default)]
pub struct Chunker {
    strategy: ChunkingStrategy,
}

impl Chunker {
    /// Create a chunker for `strategy`.
    pub fn new(strategy: ChunkingStrategy) -> Self {
        Self { strategy }
    }

    /// The active strategy.
    pub fn strategy(&self) -> &ChunkingStrategy {
        &self.strategy
    }

    /// Split `text` into ordered segments of at most `max_tokens` each.
    ///
    /// A `max_tokens` of zero is treated as one.
    pub fn chunk(&self, text: &str, max_tokens: usize) -> Vec<Segment> {
        if text.is_empty() {
            return Vec::new();
        }
        let max_tokens = max_tokens.max(1);
        let segments = match &self.strategy {
            ChunkingStrategy::SentencePacking { delimiter } => {
                pack_sentences(text, delimiter, max_tokens)
            }
            ChunkingStrategy::FixedWindow { token_factor } => {
                fixed_windows(text, window_chars(max_tokens, *token_factor))
            }
        };

        debug!(
            segments = segments.len(),
            sizes = ?segments.iter().map(|s| s.estimated_size).collect::<Vec<_>>(),
            "chunked text"
        );
        segments
    }
}

/// Character budget for a fixed window: `floor(max_tokens * token_factor)`,
/// never below one.
pub fn window_chars(max_tokens: usize, token_factor: f64) -> usize {
    let size = (max_tokens as f64 * token_factor).floor();
    if size.is_nan() || size < 1.0 {
        1
    } else {
        size as usize
    }
}

fn pack_sentences(text: &str, delimiter: &str, max_tokens: usize) -> Vec<Segment> {
    if delimiter.is_empty() {
        return vec![Segment::new(text, 0, word_count(text))];
    }

    let mut segments = Vec::new();
    let mut start = 0;
    let mut end = 0;
    let mut buffer_words = 0;

    for sentence in text.split_inclusive(delimiter) {
        let words = word_count(sentence);
        if words > 0 && buffer_words > 0 && buffer_words + words > max_tokens {
            seal(&mut segments, &text[start..end]);
            start = end;
            buffer_words = 0;
        }
        end += sentence.len();
        buffer_words += words;
    }
    if end > start {
        seal(&mut segments, &text[start..end]);
    }
    segments
}

fn seal(segments: &mut Vec<Segment>, content: &str) {
    let index = segments.len();
    segments.push(Segment::new(content, index, word_count(content)));
}

fn fixed_windows(text: &str, chunk_chars: usize) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut chars_in_window = 0;

    for (offset, _) in text.char_indices() {
        if chars_in_window == chunk_chars {
            let content = &text[start..offset];
            segments.push(Segment::new(content, segments.len(), chars_in_window));
            start = offset;
            chars_in_window = 0;
        }
        chars_in_window += 1;
    }
    if start < text.len() {
        let content = &text[start..];
        segments.push(Segment::new(content, segments.len(), char_count(content)));
    }
    segments
}
