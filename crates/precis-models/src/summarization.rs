//! Hosted summarization endpoint.
//!
//! `POST {base_url}/summarize`
//!
//! ```json
//! {"model": "...", "inputs": "...", "parameters": {"min_length": 10, "max_length": 150}}
//! ```
//!
//! The reply is either `[{"summary_text": "..."}]` or `{"summary_text": "..."}`.

use async_trait::async_trait;
use precis_core::{ModelError, SummarizationModel};
use serde::{Deserialize, Serialize};

use crate::client::{HttpModelConfig, ModelClient};

const SUMMARIZE_PATH: &str = "summarize";

#[derive(Serialize)]
struct SummarizeRequest<'a> {
    model: &'a str,
    inputs: &'a str,
    parameters: LengthParameters,
}

#[derive(Serialize)]
struct LengthParameters {
    min_length: usize,
    max_length: usize,
}

#[derive(Deserialize)]
struct SummaryText {
    summary_text: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SummarizeResponse {
    Batch(Vec<SummaryText>),
    Single(SummaryText),
}

impl SummarizeResponse {
    fn into_text(self) -> Result<String, ModelError> {
        match self {
            Self::Single(item) => Ok(item.summary_text),
            Self::Batch(items) => items
                .into_iter()
                .next()
                .map(|item| item.summary_text)
                .ok_or_else(|| ModelError::Malformed {
                    reason: "empty summary list".into(),
                }),
        }
    }
}

/// [`SummarizationModel`] backed by an HTTP inference endpoint.
#[derive(Clone, Debug)]
pub struct HttpSummarizationModel {
    client: ModelClient,
}

impl HttpSummarizationModel {
    /// Create an adapter with a fresh `reqwest` client.
    pub fn new(config: HttpModelConfig) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    /// Create an adapter sharing an existing `reqwest` client.
    pub fn with_client(config: HttpModelConfig, http: reqwest::Client) -> Self {
        Self {
            client: ModelClient::new(config, http),
        }
    }

    /// Endpoint configuration.
    pub fn config(&self) -> &HttpModelConfig {
        self.client.config()
    }
}

#[async_trait]
impl SummarizationModel for HttpSummarizationModel {
    async fn summarize(
        &self,
        text: &str,
        min_length: usize,
        max_length: usize,
    ) -> Result<String, ModelError> {
        let request = SummarizeRequest {
            model: &self.config().model,
            inputs: text,
            parameters: LengthParameters {
                min_length,
                max_length,
            },
        };
        let response: SummarizeResponse = self.client.post_json(SUMMARIZE_PATH, &request).await?;
        response.into_text()
    }
}
