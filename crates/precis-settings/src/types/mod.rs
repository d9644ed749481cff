//! Settings type definitions.
//!
//! Every struct uses `#[serde(rename_all = "camelCase", default)]` so a
//! partial JSON file deserializes with compiled defaults filling the gaps.

mod entities;
mod logging;
mod models;
mod summarizer;

pub use entities::EntitySettings;
pub use logging::{LogFormat, LoggingSettings};
pub use models::{EndpointSettings, ModelSettings, RetrySettings};
pub use summarizer::{ChunkingSettings, DEFAULT_TOKEN_FACTOR, SummarizerSettings};

use serde::{Deserialize, Serialize};

/// Root settings object.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrecisSettings {
    /// Summarization controller.
    pub summarizer: SummarizerSettings,
    /// Entity aggregator.
    pub entities: EntitySettings,
    /// Model endpoints.
    pub models: ModelSettings,
    /// Logging.
    pub logging: LoggingSettings,
}
