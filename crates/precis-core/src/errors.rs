//! Error taxonomy.
//!
//! Three failure classes exist and only one of them ever reaches a caller:
//!
//! - [`InvalidInputError`]: rejected before any processing; returned to the caller.
//! - [`SegmentFailure`]: one segment's model call failed; absorbed by the
//!   segment summarizer and recorded, never returned.
//! - Non-convergence: not an error at all; reported through the summary's
//!   termination state and a warn event.
//!
//! [`ModelError`] is what capability implementations return. It is the
//! payload of a [`SegmentFailure`] and drives retry decisions in the HTTP
//! adapters.

use thiserror::Error;

/// Input rejected before summarization begins.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvalidInputError {
    /// Text is empty or whitespace-only.
    #[error("text cannot be empty or whitespace")]
    Empty,

    /// Text has fewer words than the configured minimum.
    #[error("input text must contain at least {min_words} words (got {words})")]
    TooShort {
        /// Words found in the input.
        words: usize,
        /// Minimum accepted word count.
        min_words: usize,
    },
}

/// Failure reported by a model capability.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ModelError {
    /// The call exceeded its time budget.
    #[error("model call timed out after {timeout_ms}ms")]
    Timeout {
        /// Timeout in milliseconds.
        timeout_ms: u64,
    },

    /// The model answered with something that could not be interpreted.
    #[error("malformed model output: {reason}")]
    Malformed {
        /// Why the output was rejected.
        reason: String,
    },

    /// The model endpoint answered with a non-success status.
    #[error("model endpoint returned {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body or reason phrase.
        message: String,
    },

    /// Connection-level failure before a response arrived.
    #[error("transport error: {0}")]
    Transport(String),

    /// Capability-internal failure.
    #[error("{0}")]
    Other(String),
}

impl ModelError {
    /// Whether retrying the same call may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::Transport(_) => true,
            Self::Http { status, .. } => *status == 429 || (500..600).contains(status),
            Self::Malformed { .. } | Self::Other(_) => false,
        }
    }

    /// Short category string for log fields.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => "timeout",
            Self::Malformed { .. } => "malformed",
            Self::Http { .. } => "http",
            Self::Transport(_) => "transport",
            Self::Other(_) => "other",
        }
    }
}

/// A single segment whose summarization failed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("segment {segment} failed: {error}")]
pub struct SegmentFailure {
    /// Index of the segment within its pass.
    pub segment: usize,
    /// Underlying model error.
    pub error: ModelError,
}
