use async_trait::async_trait;

use crate::domain::{ChatMessage, DomainError};

/// An interface for sending a chat transcript to a hosted inference provider
/// and receiving the generated reply.
///
/// Implementors encapsulate transport, serialization, and vendor-specific API
/// details. Consumers (e.g. [`crate::application::RelayChatUseCase`]) remain
/// decoupled from any particular provider or HTTP client library.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send the ordered `(role, content)` pairs and return the content of the
    /// first completion choice, untransformed.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, DomainError>;
}
