use anyhow::Result;

use crate::connector::tui::ChatApp;

use super::super::Container;

pub struct ChatController<'a> {
    container: &'a Container,
}

impl<'a> ChatController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn chat(&self, endpoint: String) -> Result<String> {
        let app = ChatApp::new(
            self.container.widget(),
            self.container.relay_client(&endpoint),
        );
        let exchanged = app.run().await?;

        Ok(format!(
            "Session closed after {} messages. Nothing was saved.",
            exchanged
        ))
    }
}
