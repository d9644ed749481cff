//! Entity aggregation settings.

use serde::{Deserialize, Serialize};

/// Entity aggregator settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EntitySettings {
    /// Label vocabulary the extraction model is constrained to.
    pub labels: Vec<String>,
    /// Delimiter used to slice text into sentences.
    pub sentence_delimiter: String,
}

impl Default for EntitySettings {
    fn default() -> Self {
        Self {
            labels: vec!["company".to_string()],
            sentence_delimiter: ".".to_string(),
        }
    }
}
