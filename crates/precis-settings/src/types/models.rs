//! Model endpoint settings.

use serde::{Deserialize, Serialize};

/// Endpoints for both model capabilities plus shared retry policy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModelSettings {
    /// Summarization endpoint.
    pub summarization: EndpointSettings,
    /// Entity-extraction endpoint.
    pub entities: EndpointSettings,
    /// Retry policy for retryable model errors.
    pub retry: RetrySettings,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            summarization: EndpointSettings {
                base_url: "http://127.0.0.1:8700".to_string(),
                model: "google/pegasus-xsum".to_string(),
                timeout_ms: 60_000,
                api_key: None,
            },
            entities: EndpointSettings {
                base_url: "http://127.0.0.1:8701".to_string(),
                model: "EmergentMethods/gliner_large_news-v2.1".to_string(),
                timeout_ms: 30_000,
                api_key: None,
            },
            retry: RetrySettings::default(),
        }
    }
}

/// One HTTP model endpoint.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EndpointSettings {
    /// Base URL, without a trailing path.
    pub base_url: String,
    /// Model identifier forwarded to the endpoint.
    pub model: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Bearer token, if the endpoint requires one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// Capped exponential backoff.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RetrySettings {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Base delay in milliseconds.
    pub base_delay_ms: u64,
    /// Delay cap in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay_ms: 500,
            max_delay_ms: 10_000,
        }
    }
}
