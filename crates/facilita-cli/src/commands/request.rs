use super::display::{money, request_line};
use anyhow::Result;
use facilita_application::{AppContext, MarketplaceService, RequestForm};
use std::sync::Arc;

/// A lifecycle step taken from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Accept,
    Reject,
    Start,
    Complete,
    Cancel,
}

pub async fn create(ctx: &Arc<AppContext>, form: RequestForm) -> Result<()> {
    let request = MarketplaceService::new(ctx.clone())
        .submit_request(form)
        .await?;
    println!("Request created: {}", request_line(&request));
    Ok(())
}

pub async fn list(ctx: &Arc<AppContext>) -> Result<()> {
    let requests = MarketplaceService::new(ctx.clone()).my_requests().await?;
    if requests.is_empty() {
        println!("No requests yet.");
    }
    for request in &requests {
        println!("{}", request_line(request));
    }
    Ok(())
}

pub async fn show(ctx: &Arc<AppContext>, request_id: &str) -> Result<()> {
    let marketplace = MarketplaceService::new(ctx.clone());
    let request = marketplace.request_details(request_id).await?;
    println!("{}", request_line(&request));
    if let Some(customer) = &request.customer_name {
        println!("  customer:    {}", customer);
    }
    println!("  provider:    {}", request.provider_name.as_deref().unwrap_or(&request.provider_id));
    println!("  address:     {}", request.address);
    println!("  description: {}", request.description);
    println!("  value:       {}", money(request.value));
    println!("  created:     {}", request.created_at);
    for review in marketplace.request_reviews(request_id).await? {
        println!("  review:      {} {}", review.rating, review.comment);
    }
    Ok(())
}

pub async fn transition(ctx: &Arc<AppContext>, request_id: &str, step: Step) -> Result<()> {
    let marketplace = MarketplaceService::new(ctx.clone());
    let request = match step {
        Step::Accept => marketplace.accept(request_id).await?,
        Step::Reject => marketplace.reject(request_id).await?,
        Step::Start => marketplace.start(request_id).await?,
        Step::Complete => marketplace.complete(request_id).await?,
        Step::Cancel => marketplace.cancel(request_id).await?,
    };
    println!("Request {} is now {}.", request.id, request.status);
    Ok(())
}

pub async fn review(
    ctx: &Arc<AppContext>,
    request_id: &str,
    rating: u8,
    comment: &str,
) -> Result<()> {
    let review = MarketplaceService::new(ctx.clone())
        .review(request_id, rating, comment)
        .await?;
    println!("Thanks! You rated request {} {}.", review.request_id, review.rating);
    Ok(())
}
