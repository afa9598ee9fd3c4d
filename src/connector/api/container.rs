use std::sync::Arc;

use tracing::debug;

use crate::application::{ChatClient, RelayChatUseCase, RelayClient};
use crate::{ConversationWidget, HuggingFaceClient, MockChatClient, RelayHttpClient};

pub struct ContainerConfig {
    /// Answer from the offline echo provider instead of Hugging Face.
    pub mock_provider: bool,
}

pub struct Container {
    chat_client: Arc<dyn ChatClient>,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Self {
        let chat_client: Arc<dyn ChatClient> = if config.mock_provider {
            debug!("Using mock inference provider");
            Arc::new(MockChatClient::new())
        } else {
            let client = HuggingFaceClient::from_env();
            debug!(
                "Using Hugging Face inference provider at {} with model {}",
                client.url(),
                client.model()
            );
            Arc::new(client)
        };

        Self::with_chat_client(chat_client)
    }

    pub fn with_chat_client(chat_client: Arc<dyn ChatClient>) -> Self {
        Self { chat_client }
    }

    pub fn relay_use_case(&self) -> RelayChatUseCase {
        RelayChatUseCase::new(self.chat_client.clone())
    }

    pub fn relay_client(&self, endpoint: &str) -> Arc<dyn RelayClient> {
        Arc::new(RelayHttpClient::new(endpoint))
    }

    /// A fresh widget for a new session.
    pub fn widget(&self) -> ConversationWidget {
        ConversationWidget::new()
    }
}
