mod conversation_widget;
mod relay_chat;

pub use conversation_widget::*;
pub use relay_chat::*;
