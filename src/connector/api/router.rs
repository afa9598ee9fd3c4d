use anyhow::Result;

use crate::Commands;

use super::container::Container;
use super::controller::{ChatController, SendController, ServeController};

pub struct Router<'a> {
    serve_controller: ServeController<'a>,
    chat_controller: ChatController<'a>,
    send_controller: SendController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            serve_controller: ServeController::new(container),
            chat_controller: ChatController::new(container),
            send_controller: SendController::new(container),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Serve { bind } => self.serve_controller.serve(bind).await,
            Commands::Chat { endpoint } => self.chat_controller.chat(endpoint).await,
            Commands::Send { message, endpoint } => {
                self.send_controller.send(message, endpoint).await
            }
        }
    }
}
