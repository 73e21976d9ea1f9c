//! Service catalog domain module.
//!
//! # Module Structure
//!
//! - `model`: `Service` offered by a provider and the `ServiceQuery` search filter
//! - `seed`: the catalog loaded when no services have been persisted yet

mod model;
pub mod seed;

// Re-export public API
pub use model::{Service, ServiceQuery};
