//! Review domain module.

mod model;

// Re-export public API
pub use model::{NewReview, Rating, Review};
