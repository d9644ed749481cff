//! Entity aggregation over sentence slices.

use std::sync::Arc;

use precis_core::{EntityMap, EntityModel};
use precis_settings::EntitySettings;
use tracing::{debug, info, instrument, warn};

/// Aggregator parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AggregatorConfig {
    /// Label vocabulary passed to the model on every call.
    pub labels: Vec<String>,
    /// Sentence delimiter.
    pub sentence_delimiter: String,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self::from(&EntitySettings::default())
    }
}

impl From<&EntitySettings> for AggregatorConfig {
    fn from(settings: &EntitySettings) -> Self {
        Self {
            labels: settings.labels.clone(),
            sentence_delimiter: settings.sentence_delimiter.clone(),
        }
    }
}

/// Split `text` on `delimiter`, trimming each slice and dropping empty ones.
///
/// An empty delimiter yields the whole trimmed text as one sentence.
pub fn split_sentences<'a>(text: &'a str, delimiter: &str) -> Vec<&'a str> {
    if delimiter.is_empty() {
        let trimmed = text.trim();
        return if trimmed.is_empty() {
            Vec::new()
        } else {
            vec![trimmed]
        };
    }
    text.split(delimiter)
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
        .collect()
}

/// Runs an [`EntityModel`] per sentence and merges the results.
pub struct EntityAggregator {
    model: Arc<dyn EntityModel>,
    config: AggregatorConfig,
}

impl EntityAggregator {
    /// Create an aggregator over `model`.
    pub fn new(model: Arc<dyn EntityModel>, config: AggregatorConfig) -> Self {
        Self { model, config }
    }

    /// Active configuration.
    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Extract deduplicated entities from `text`.
    ///
    /// Sentences are processed in order, so ties resolve to the earliest
    /// occurrence. A sentence whose model call fails is skipped with a
    /// warning; this never fails.
    #[instrument(skip_all, fields(labels = ?self.config.labels))]
    pub async fn extract(&self, text: &str) -> EntityMap {
        let sentences = split_sentences(text, &self.config.sentence_delimiter);
        info!(sentences = sentences.len(), "extracting entities");

        let mut entities = EntityMap::new();
        let mut skipped = 0usize;
        for (index, sentence) in sentences.iter().enumerate() {
            match self
                .model
                .predict_entities(sentence, &self.config.labels)
                .await
            {
                Ok(found) => {
                    debug!(sentence = index, found = found.len(), "sentence processed");
                    entities.merge_all(found);
                }
                Err(error) => {
                    skipped += 1;
                    warn!(
                        sentence = index,
                        category = error.category(),
                        error = %error,
                        "entity extraction failed for sentence"
                    );
                }
            }
        }

        info!(entities = entities.len(), skipped, "entity extraction complete");
        entities
    }
}

impl std::fmt::Debug for EntityAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityAggregator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
