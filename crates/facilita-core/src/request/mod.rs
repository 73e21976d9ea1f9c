//! Service request domain module.
//!
//! A request is a customer's booking of one provider's service. It carries
//! its own lifecycle status; see [`RequestStatus::can_transition_to`].

mod model;

// Re-export public API
pub use model::{NewRequest, Request, RequestStatus, RequestUpdate};
