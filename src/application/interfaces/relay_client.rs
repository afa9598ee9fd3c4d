use async_trait::async_trait;

use crate::domain::{DomainError, Message};

/// Client side of the relay endpoint contract.
///
/// The conversation widget talks to the relay only through this trait, so it
/// can be driven by the real HTTP client or a scripted stand-in.
#[async_trait]
pub trait RelayClient: Send + Sync {
    /// Post the full transcript and return the assistant reply text.
    async fn send(&self, transcript: &[Message]) -> Result<String, DomainError>;
}
