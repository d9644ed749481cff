//! Shared JSON-over-HTTP plumbing for the model adapters.

use std::time::Duration;

use precis_core::ModelError;
use precis_settings::{EndpointSettings, RetrySettings};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::retry::{RetryPolicy, with_retry};

/// Connection parameters for one model endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpModelConfig {
    /// Base URL; request paths are appended to it.
    pub base_url: String,
    /// Model identifier sent in every request body.
    pub model: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Bearer token.
    pub api_key: Option<String>,
    /// Retry policy for retryable failures.
    pub retry: RetryPolicy,
}

impl HttpModelConfig {
    /// Build from an endpoint section and the shared retry section.
    pub fn from_settings(endpoint: &EndpointSettings, retry: &RetrySettings) -> Self {
        Self {
            base_url: endpoint.base_url.clone(),
            model: endpoint.model.clone(),
            timeout: Duration::from_millis(endpoint.timeout_ms),
            api_key: endpoint.api_key.clone(),
            retry: RetryPolicy::from(retry),
        }
    }

    /// Full URL for `path`.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// A `reqwest` client bound to one endpoint.
#[derive(Clone, Debug)]
pub(crate) struct ModelClient {
    http: reqwest::Client,
    config: HttpModelConfig,
}

impl ModelClient {
    pub(crate) fn new(config: HttpModelConfig, http: reqwest::Client) -> Self {
        Self { http, config }
    }

    pub(crate) fn config(&self) -> &HttpModelConfig {
        &self.config
    }

    /// POST `body` to `path` and decode the JSON reply, retrying per policy.
    #[instrument(skip_all, fields(path = %path, model = %self.config.model))]
    pub(crate) async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ModelError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned + Send,
    {
        let url = self.config.url(path);
        with_retry(&self.config.retry, path, || self.post_once(&url, body)).await
    }

    async fn post_once<B, R>(&self, url: &str, body: &B) -> Result<R, ModelError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned + Send,
    {
        let mut request = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .timeout(self.config.timeout)
            .json(body);
        if let Some(key) = &self.config.api_key {
            request = request.header(AUTHORIZATION, format!("Bearer {key}"));
        }

        let response = request.send().await.map_err(|e| self.map_reqwest(&e))?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = if text.is_empty() {
                status.canonical_reason().unwrap_or("unknown").to_string()
            } else {
                text
            };
            return Err(ModelError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await.map_err(|e| self.map_reqwest(&e))?;
        debug!(url, status = status.as_u16(), bytes = bytes.len(), "model response");
        serde_json::from_slice(&bytes).map_err(|e| ModelError::Malformed {
            reason: e.to_string(),
        })
    }

    fn map_reqwest(&self, err: &reqwest::Error) -> ModelError {
        if err.is_timeout() {
            ModelError::Timeout {
                timeout_ms: self.config.timeout.as_millis() as u64,
            }
        } else {
            ModelError::Transport(err.to_string())
        }
    }
}
