//! User domain module.
//!
//! # Module Structure
//!
//! - `model`: the authenticated `User` record and its `UserRole`
//!
//! # Usage
//!
//! ```ignore
//! use facilita_core::user::{User, UserRole};
//! ```

mod model;

// Re-export public API
pub use model::{User, UserRole};
