use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info};

use crate::application::ChatClient;
use crate::domain::{ChatMessage, DomainError};

/// Error text returned to callers whose transcript fails validation.
pub const INVALID_MESSAGES: &str = "invalid messages";

/// Use case behind the relay endpoint: validate a transcript, forward it to the
/// inference provider, and unwrap the first completion choice.
///
/// Holds no mutable state, so one instance can serve any number of concurrent
/// requests.
pub struct RelayChatUseCase {
    chat_client: Arc<dyn ChatClient>,
}

impl RelayChatUseCase {
    pub fn new(chat_client: Arc<dyn ChatClient>) -> Self {
        Self { chat_client }
    }

    /// Relay the `messages` field of an inbound request body.
    ///
    /// Returns [`DomainError::InvalidInput`] without calling the provider when
    /// `messages` is missing, not an array, or empty. Elements themselves are
    /// not checked; every other error comes from the provider call.
    pub async fn execute(&self, messages: &Value) -> Result<String, DomainError> {
        let transcript = Self::parse_transcript(messages)?;

        info!("Relaying transcript of {} messages", transcript.len());
        debug!("Inbound transcript: {:?}", transcript);

        self.chat_client.complete(&transcript).await
    }

    /// Map the raw `messages` value to the `(role, content)` pairs that are
    /// forwarded. Any `id` or extra field is dropped here.
    pub fn parse_transcript(messages: &Value) -> Result<Vec<ChatMessage>, DomainError> {
        match messages.as_array() {
            Some(items) if !items.is_empty() => {
                Ok(items.iter().map(ChatMessage::from_value).collect())
            }
            _ => Err(DomainError::invalid_input(INVALID_MESSAGES)),
        }
    }
}
