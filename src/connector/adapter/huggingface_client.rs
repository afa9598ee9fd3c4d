use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::application::ChatClient;
use crate::domain::{ChatMessage, DomainError};

pub const DEFAULT_BASE_URL: &str = "https://router.huggingface.co/v1";
const COMPLETIONS_PATH: &str = "/chat/completions";
pub const DEFAULT_MODEL: &str = "mistralai/Mistral-7B-Instruct-v0.2";
/// Generation cap sent with every request. Callers of the relay cannot change it.
pub const MAX_TOKENS: u32 = 100;

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
}

/// Minimal subset of the chat-completion response we care about.
#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// HTTP client for the Hugging Face inference router's OpenAI-compatible
/// chat-completion API.
///
/// Configuration comes from the environment:
///
/// | Variable               | Default                               |
/// |------------------------|---------------------------------------|
/// | `HUGGINGFACE_API_KEY`  | `""` (calls then fail upstream)       |
/// | `HUGGINGFACE_BASE_URL` | `https://router.huggingface.co/v1`    |
/// | `HUGGINGFACE_MODEL`    | `mistralai/Mistral-7B-Instruct-v0.2`  |
///
/// No request timeout is set; a call waits for the provider for as long as
/// the connection stays open.
pub struct HuggingFaceClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    /// Full endpoint URL (base + COMPLETIONS_PATH).
    url: String,
}

impl HuggingFaceClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let base: String = base_url.into();
        let url = format!("{}{}", base.trim_end_matches('/'), COMPLETIONS_PATH);
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            url,
        }
    }

    pub fn from_env() -> Self {
        let base = std::env::var("HUGGINGFACE_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model =
            std::env::var("HUGGINGFACE_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let key = std::env::var("HUGGINGFACE_API_KEY").unwrap_or_default();
        if key.is_empty() {
            warn!("HUGGINGFACE_API_KEY is not set; provider calls will be rejected");
        }
        Self::new(key, model, base)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Extract the first choice's message content from a raw response body.
    fn parse_response(body: &str) -> Result<String, DomainError> {
        let api_response: ApiResponse = serde_json::from_str(body).map_err(|e| {
            DomainError::provider(format!("HuggingFaceClient: failed to parse response: {e}"))
        })?;

        api_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::provider("HuggingFaceClient: response contained no choices"))?
            .message
            .content
            .ok_or_else(|| {
                DomainError::provider("HuggingFaceClient: first choice has no message content")
            })
    }
}

#[async_trait]
impl ChatClient for HuggingFaceClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, DomainError> {
        let request = ApiRequest {
            model: &self.model,
            messages,
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::provider(format!("HuggingFaceClient: request failed: {e}")))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            DomainError::provider(format!("HuggingFaceClient: failed to read response: {e}"))
        })?;

        if !status.is_success() {
            warn!("HuggingFaceClient: API returned {status}: {body}");
            return Err(DomainError::provider(format!(
                "HuggingFaceClient: API returned {status}"
            )));
        }

        debug!("HuggingFaceClient raw response: {body}");
        Self::parse_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_response_takes_first_choice() {
        let body = r#"{
            "id": "cmpl-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "Olá! Como posso ajudar?"}},
                {"index": 1, "message": {"role": "assistant", "content": "second"}}
            ]
        }"#;

        assert_eq!(
            HuggingFaceClient::parse_response(body).unwrap(),
            "Olá! Como posso ajudar?"
        );
    }

    #[test]
    fn parse_response_keeps_whitespace() {
        let body = r#"{"choices": [{"message": {"content": "  spaced out \n"}}]}"#;
        assert_eq!(HuggingFaceClient::parse_response(body).unwrap(), "  spaced out \n");
    }

    #[test]
    fn parse_response_rejects_empty_choices() {
        let err = HuggingFaceClient::parse_response(r#"{"choices": []}"#).unwrap_err();
        assert!(err.is_provider_error());
    }

    #[test]
    fn parse_response_rejects_null_content() {
        let body = r#"{"choices": [{"message": {"content": null}}]}"#;
        assert!(HuggingFaceClient::parse_response(body).is_err());
    }

    #[test]
    fn parse_response_rejects_garbage() {
        assert!(HuggingFaceClient::parse_response("<html>bad gateway</html>").is_err());
    }

    #[test]
    fn new_joins_base_url_and_path() {
        let client = HuggingFaceClient::new("key", "model", "http://localhost:8080/v1/");
        assert_eq!(client.url(), "http://localhost:8080/v1/chat/completions");
        assert_eq!(client.model(), "model");
    }
}
