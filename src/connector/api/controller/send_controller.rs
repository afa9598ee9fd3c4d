use anyhow::{anyhow, Result};

use super::super::Container;

pub struct SendController<'a> {
    container: &'a Container,
}

impl<'a> SendController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    /// One round trip through a fresh widget; returns the assistant reply.
    pub async fn send(&self, message: String, endpoint: String) -> Result<String> {
        if message.trim().is_empty() {
            return Err(anyhow!("Refusing to send an empty message"));
        }

        let client = self.container.relay_client(&endpoint);
        let mut widget = self.container.widget();
        widget.set_draft(message);

        if widget.round_trip(client.as_ref()).await {
            let reply = widget
                .transcript()
                .last()
                .map(|m| m.content().to_string())
                .unwrap_or_default();
            Ok(reply)
        } else {
            let reason = widget
                .notification()
                .map(|n| n.description().to_string())
                .unwrap_or_else(|| "unknown error".to_string());
            Err(anyhow!("Round trip failed: {}", reason))
        }
    }
}
