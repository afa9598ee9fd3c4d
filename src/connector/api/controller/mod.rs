pub mod chat_controller;
pub mod relay_controller;
pub mod send_controller;
pub mod serve_controller;

pub use chat_controller::ChatController;
pub use relay_controller::{RelayController, CHAT_PATH, INTERNAL_SERVER_ERROR};
pub use send_controller::SendController;
pub use serve_controller::ServeController;
