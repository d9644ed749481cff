//! Loop state and terminal outcomes.

use precis_core::word_count;
use serde::Serialize;

/// Mutable state of one controller invocation.
///
/// The word count is recomputed from the text on every advance, never
/// adjusted incrementally.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IterationState {
    /// Completed passes (0-based counter).
    pub iteration_number: usize,
    /// Text produced by the last completed pass (or the input).
    pub current_text: String,
    /// Word count of `current_text`.
    pub current_word_count: usize,
}

impl IterationState {
    /// Initial state for `text`.
    pub fn new(text: impl Into<String>) -> Self {
        let current_text = text.into();
        let current_word_count = word_count(&current_text);
        Self {
            iteration_number: 0,
            current_text,
            current_word_count,
        }
    }

    /// Record a completed pass that produced `text`.
    pub fn advance(&mut self, text: String) {
        self.current_word_count = word_count(&text);
        self.current_text = text;
        self.iteration_number += 1;
    }

    /// Whether the current text is within `target_length` words.
    pub fn is_within(&self, target_length: usize) -> bool {
        self.current_word_count <= target_length
    }
}

/// How the controller loop ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// Word count reached the target.
    Converged,
    /// Pass budget ran out while still over the target.
    Exhausted,
    /// Every segment of a pass failed; the previous text was kept.
    Stalled,
}

impl std::fmt::Display for Termination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Converged => write!(f, "converged"),
            Self::Exhausted => write!(f, "exhausted"),
            Self::Stalled => write!(f, "stalled"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_recomputes_word_count() {
        let mut state = IterationState::new("one two three four");
        assert_eq!(state.current_word_count, 4);
        state.advance("  one   two ".into());
        assert_eq!(state.current_word_count, 2);
        assert_eq!(state.iteration_number, 1);
    }

    #[test]
    fn within_target_is_inclusive() {
        let state = IterationState::new("a b c");
        assert!(state.is_within(3));
        assert!(!state.is_within(2));
    }

    #[test]
    fn termination_display_and_serde_agree() {
        for t in [Termination::Converged, Termination::Exhausted, Termination::Stalled] {
            let json = serde_json::to_value(t).unwrap();
            assert_eq!(json, serde_json::Value::String(t.to_string()));
        }
    }
}
