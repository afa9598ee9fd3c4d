//! Terminal rendering of the conversation widget.
//!
//! The widget owns all conversation state; this module only turns terminal
//! events into widget operations and draws whatever the widget holds.

mod app;
mod view;

pub use app::ChatApp;
pub use view::{render, wrap_text};
