//! Conversation domain module.
//!
//! Each request has at most one conversation between its customer and its
//! provider. Messages are append-only.

mod model;

// Re-export public API
pub use model::{Conversation, Message};
