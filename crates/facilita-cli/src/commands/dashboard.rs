use super::display::{money, request_line};
use anyhow::{Result, bail};
use facilita_application::{AppContext, DashboardService};
use facilita_core::data::MarketplaceStats;
use facilita_core::user::UserRole;
use std::sync::Arc;

/// Shows the dashboard matching the signed-in user's role.
pub async fn show(ctx: &Arc<AppContext>) -> Result<()> {
    let user = ctx.require_user(&[]).await?;
    let dashboard = DashboardService::new(ctx.clone());
    match user.role {
        UserRole::Provider => {
            let overview = dashboard.provider_dashboard().await?;
            println!("Earnings: {}", money(overview.earnings()));
            print_stats(&overview.stats);
            println!("Services:");
            for service in &overview.services {
                let state = if service.is_active { "" } else { " (inactive)" };
                println!("  [{}] {}{}", service.id, service.name, state);
            }
            println!("Waiting for your answer:");
            if overview.pending.is_empty() {
                println!("  nothing pending");
            }
            for request in &overview.pending {
                println!("  {}", request_line(request));
            }
        }
        UserRole::Administrator => print_stats(&dashboard.admin_dashboard().await?),
        UserRole::Customer => bail!("there is no dashboard for customers; try `facilita request list`"),
    }
    Ok(())
}

fn print_stats(stats: &MarketplaceStats) {
    println!("Requests: {}", stats.total_requests);
    for (status, count) in &stats.status_counts {
        println!("  {:<12} {}", status.to_string(), count);
    }
    println!("Active services: {}", stats.active_services);
    println!(
        "Customers: {}  Providers: {}",
        stats.distinct_customers, stats.distinct_providers
    );
    println!(
        "Revenue: {} paid, {} pending",
        money(stats.paid_revenue),
        money(stats.pending_revenue)
    );
    match stats.average_rating {
        Some(avg) => println!("Rating: {:.1} from {} reviews", avg, stats.review_count),
        None => println!("Rating: no reviews yet"),
    }
}
