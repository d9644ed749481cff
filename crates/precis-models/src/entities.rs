//! Hosted entity-extraction endpoint.
//!
//! `POST {base_url}/entities` with `{"model", "text", "labels"}`. The reply
//! is a bare array of `{"text", "label", "score"}` objects or the same
//! array wrapped as `{"entities": [...]}`.

use async_trait::async_trait;
use precis_core::{Entity, EntityModel, ModelError};
use serde::{Deserialize, Serialize};

use crate::client::{HttpModelConfig, ModelClient};

const ENTITIES_PATH: &str = "entities";

#[derive(Serialize)]
struct EntitiesRequest<'a> {
    model: &'a str,
    text: &'a str,
    labels: &'a [String],
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EntitiesResponse {
    Bare(Vec<Entity>),
    Wrapped { entities: Vec<Entity> },
}

impl From<EntitiesResponse> for Vec<Entity> {
    fn from(response: EntitiesResponse) -> Self {
        match response {
            EntitiesResponse::Bare(entities) | EntitiesResponse::Wrapped { entities } => entities,
        }
    }
}

/// [`EntityModel`] backed by an HTTP inference endpoint.
#[derive(Clone, Debug)]
pub struct HttpEntityModel {
    client: ModelClient,
}

impl HttpEntityModel {
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
impl EntityModel for HttpEntityModel {
    async fn predict_entities(
        &self,
        text: &str,
        labels: &[String],
    ) -> Result<Vec<Entity>, ModelError> {
        let request = EntitiesRequest {
            model: &self.config().model,
            text,
            labels,
        };
        let response: EntitiesResponse = self.client.post_json(ENTITIES_PATH, &request).await?;
        Ok(response.into())
    }
}
