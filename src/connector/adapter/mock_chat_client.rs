use async_trait::async_trait;

use crate::application::ChatClient;
use crate::domain::{ChatMessage, DomainError};

/// Offline provider that echoes the latest user message.
pub struct MockChatClient;

impl MockChatClient {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MockChatClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatClient for MockChatClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, DomainError> {
        let last_user = messages
            .iter()
            .rev()
            .find(|m| m.role == "user")
            .ok_or_else(|| DomainError::provider("mock provider: no user message"))?;

        let content = last_user
            .content
            .as_str()
            .map(String::from)
            .unwrap_or_else(|| last_user.content.to_string());
        Ok(format!("You said: {}", content))
    }
}
