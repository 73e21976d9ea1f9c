use anyhow::Result;
use facilita_application::{AppContext, MessagingService};
use std::sync::Arc;

pub async fn open(ctx: &Arc<AppContext>, request_id: &str) -> Result<()> {
    let me = ctx.require_user(&[]).await?;
    let view = MessagingService::new(ctx.clone())
        .open_conversation(request_id)
        .await?;
    println!(
        "Conversation {} (request {})",
        view.conversation.id, view.conversation.request_id
    );
    if view.messages.is_empty() {
        println!("  No messages yet.");
    }
    for message in &view.messages {
        let who = if message.sender_id == me.id {
            "you"
        } else {
            message.sender_id.as_str()
        };
        println!("  [{}] {}: {}", message.created_at, who, message.content);
    }
    Ok(())
}

pub async fn send(ctx: &Arc<AppContext>, conversation_id: &str, text: &str) -> Result<()> {
    let message = MessagingService::new(ctx.clone())
        .send_message(conversation_id, text)
        .await?;
    println!("Sent ({}).", message.created_at);
    Ok(())
}

pub async fn inbox(ctx: &Arc<AppContext>) -> Result<()> {
    let me = ctx.require_user(&[]).await?;
    let conversations = MessagingService::new(ctx.clone()).inbox().await?;
    if conversations.is_empty() {
        println!("No conversations.");
    }
    for conversation in conversations {
        let unread_count = conversation.unread_for(&me.id);
        let unread = if unread_count > 0 {
            format!(" ({} unread)", unread_count)
        } else {
            String::new()
        };
        println!(
            "[{}] request {}{}: {}",
            conversation.id,
            conversation.request_id,
            unread,
            conversation.last_message.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}
