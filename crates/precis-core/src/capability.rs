//! Model capability traits.
//!
//! The summarization and entity-extraction models are external
//! collaborators. Components receive them as `Arc<dyn ...>` at construction,
//! so tests substitute fakes and no model instance lives in process-wide
//! state.

use async_trait::async_trait;

use crate::entity::Entity;
use crate::errors::ModelError;

/// Abstractive summarization capability.
///
/// Implementations:
/// - `HttpSummarizationModel` (in `precis-models`) -- hosted inference endpoint
/// - test fakes in each crate's test modules
#[async_trait]
pub trait SummarizationModel: Send + Sync {
    /// Summarize `text` into roughly `min_length..=max_length` words.
    ///
    /// Lengths are approximate; the model may return text outside the
    /// bounds. Any error is recoverable by the caller.
    async fn summarize(
        &self,
        text: &str,
        min_length: usize,
        max_length: usize,
    ) -> Result<String, ModelError>;
}

/// Named-entity extraction capability.
#[async_trait]
pub trait EntityModel: Send + Sync {
    /// Predict entities in `text`, restricted to `labels`.
    ///
    /// Deterministic per call. Scores are confidences in `[0, 1]`.
    async fn predict_entities(
        &self,
        text: &str,
        labels: &[String],
    ) -> Result<Vec<Entity>, ModelError>;
}
