//! # Domain Layer
//!
//! Conversation models and the error taxonomy shared by every layer.
//! This layer is independent of HTTP, terminal, and provider details.

pub mod error;
pub mod models;

pub use error::*;
pub use models::*;
