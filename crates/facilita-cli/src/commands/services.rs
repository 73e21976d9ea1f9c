use super::display::money;
use facilita_application::{AppContext, MarketplaceService};
use facilita_core::service::ServiceQuery;
use std::sync::Arc;

pub async fn search(ctx: &Arc<AppContext>, text: &str, category: Option<String>) {
    let mut query = ServiceQuery::new(text);
    if let Some(category) = category {
        query = query.with_category(category);
    }

    let services = MarketplaceService::new(ctx.clone()).browse(&query).await;
    if services.is_empty() {
        println!("No services found.");
        return;
    }
    for service in services {
        println!(
            "[{}] {} - {} ({} min, {})",
            service.id,
            service.name,
            money(service.price),
            service.duration_minutes,
            service.category
        );
        println!("    {}", service.description);
    }
}

pub async fn categories(ctx: &Arc<AppContext>) {
    for category in MarketplaceService::new(ctx.clone()).categories().await {
        println!("{}", category);
    }
}
