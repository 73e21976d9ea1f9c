//! Provider and administrator dashboards.

use crate::context::AppContext;
use facilita_core::data::MarketplaceStats;
use facilita_core::error::Result;
use facilita_core::request::{Request, RequestStatus};
use facilita_core::service::Service;
use facilita_core::user::UserRole;
use std::sync::Arc;

/// What a provider sees on their home screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderDashboard {
    pub stats: MarketplaceStats,
    /// Requests still waiting for the provider's answer, oldest first.
    pub pending: Vec<Request>,
    pub services: Vec<Service>,
}

impl ProviderDashboard {
    /// Revenue from settled payments.
    pub fn earnings(&self) -> f64 {
        self.stats.paid_revenue
    }
}

pub struct DashboardService {
    ctx: Arc<AppContext>,
}

impl DashboardService {
    pub fn new(ctx: Arc<AppContext>) -> Self {
        Self { ctx }
    }

    pub async fn provider_dashboard(&self) -> Result<ProviderDashboard> {
        let provider = self.ctx.require_user(&[UserRole::Provider]).await?;
        let data = self.ctx.data().read().await;
        let mut pending: Vec<Request> = data
            .get_requests_by_user_id(&provider.id, UserRole::Provider)
            .into_iter()
            .filter(|r| r.status == RequestStatus::Pending)
            .cloned()
            .collect();
        pending.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        Ok(ProviderDashboard {
            stats: data.provider_stats(&provider.id),
            pending,
            services: data
                .get_services_by_provider(&provider.id)
                .into_iter()
                .cloned()
                .collect(),
        })
    }

    /// Platform-wide figures; administrators only.
    pub async fn admin_dashboard(&self) -> Result<MarketplaceStats> {
        self.ctx.require_user(&[UserRole::Administrator]).await?;
        Ok(self.ctx.data().read().await.stats())
    }
}
