//! # Application Layer
//!
//! Use cases and the interfaces they depend on, coordinating domain models
//! with connector-layer adapters.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
