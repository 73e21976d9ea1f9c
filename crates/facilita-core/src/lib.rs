//! Domain layer for Facilita Hub.
//!
//! Models the marketplace entities, the session store that gates access by
//! role, and the data store that owns and persists every entity family.

pub mod auth;
pub mod conversation;
pub mod data;
pub mod error;
pub mod ids;
pub mod payment;
pub mod request;
pub mod review;
pub mod service;
pub mod storage;
pub mod user;

// Re-export common error type
pub use error::{FacilitaError, Result};
