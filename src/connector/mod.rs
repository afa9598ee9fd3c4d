//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Inference provider clients (Hugging Face router, offline mock)
//! - Relay endpoint HTTP client used by the widget
//! - HTTP API (axum) and CLI dispatch
//! - Terminal rendering of the conversation widget

pub mod adapter;
pub mod api;
pub mod tui;

pub use adapter::*;
