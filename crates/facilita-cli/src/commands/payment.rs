use super::display::money;
use anyhow::Result;
use facilita_application::{AppContext, MarketplaceService};
use std::sync::Arc;

pub async fn request(ctx: &Arc<AppContext>, request_id: &str) -> Result<()> {
    let payment = MarketplaceService::new(ctx.clone())
        .request_payment(request_id)
        .await?;
    println!(
        "Payment {} requested: {} via {}",
        payment.id,
        money(payment.amount),
        payment.payment_method
    );
    Ok(())
}

pub async fn settle(ctx: &Arc<AppContext>, payment_id: &str, paid: bool) -> Result<()> {
    let payment = MarketplaceService::new(ctx.clone())
        .settle_payment(payment_id, paid)
        .await?;
    println!("Payment {} is {}.", payment.id, payment.status);
    Ok(())
}
