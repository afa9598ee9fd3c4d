use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::application::RelayClient;
use crate::domain::{DomainError, Message};

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:3000/api/chat";

#[derive(Serialize)]
struct RelayRequest<'a> {
    messages: &'a [Message],
}

#[derive(Deserialize)]
struct RelayResponse {
    content: String,
}

/// [`RelayClient`] that POSTs the transcript to a relay endpoint over HTTP.
///
/// Any non-2xx status is a transport error carrying the response body, the
/// way the widget reports it to the user.
pub struct RelayHttpClient {
    client: reqwest::Client,
    endpoint: String,
}

impl RelayHttpClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl RelayClient for RelayHttpClient {
    async fn send(&self, transcript: &[Message]) -> Result<String, DomainError> {
        debug!("Posting {} messages to {}", transcript.len(), self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&RelayRequest {
                messages: transcript,
            })
            .send()
            .await
            .map_err(|e| DomainError::transport(format!("request to relay failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("Relay returned {status}: {body}");
            return Err(DomainError::transport(format!(
                "relay returned {status}: {body}"
            )));
        }

        let relay_response: RelayResponse = response
            .json()
            .await
            .map_err(|e| DomainError::transport(format!("failed to parse relay response: {e}")))?;

        Ok(relay_response.content)
    }
}
