//! Application layer for Facilita Hub.
//!
//! Use cases that combine the session store (who is calling, in which role)
//! with the data store (what they may read or change).

pub mod context;
pub mod dashboard;
pub mod marketplace;
pub mod messaging;

pub use context::{AppContext, MarketplaceSettings};
pub use dashboard::{DashboardService, ProviderDashboard};
pub use marketplace::{MarketplaceService, RequestForm};
pub use messaging::{ConversationView, MessagingService};
