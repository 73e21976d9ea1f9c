//! Domain data store.
//!
//! # Module Structure
//!
//! - `collection`: one persisted entity family bound to its storage key
//! - `store`: [`DataStore`], the owner of all marketplace entities
//! - `stats`: [`MarketplaceStats`] aggregation for dashboards

mod collection;
mod stats;
mod store;


// Re-export public API
pub use stats::MarketplaceStats;
pub use store::DataStore;
