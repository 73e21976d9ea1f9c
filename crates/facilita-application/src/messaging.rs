//! Conversations between the two parties of a request.

use crate::context::AppContext;
use facilita_core::conversation::{Conversation, Message};
use facilita_core::error::{FacilitaError, Result};
use facilita_core::user::User;
use std::sync::Arc;

/// A conversation together with its messages in send order.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationView {
    pub conversation: Conversation,
    pub messages: Vec<Message>,
}

pub struct MessagingService {
    ctx: Arc<AppContext>,
}

impl MessagingService {
    pub fn new(ctx: Arc<AppContext>) -> Self {
        Self { ctx }
    }

    /// Opens the conversation of a request, creating it on first use, and
    /// marks it read when the caller has unread messages in it.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown request, `Forbidden` when the caller is not
    /// one of its parties.
    pub async fn open_conversation(&self, request_id: &str) -> Result<ConversationView> {
        let user = self.ctx.require_user(&[]).await?;
        let mut data = self.ctx.data().write().await;
        let request = data
            .get_request_by_id(request_id)
            .ok_or_else(|| FacilitaError::not_found("request", request_id))?;
        if !request.involves(&user.id) {
            return Err(FacilitaError::forbidden(user.role));
        }
        let counterpart = request.counterpart_of(&user.id).to_string();

        let conversation = data.create_conversation(request_id, vec![user.id.clone(), counterpart]);
        if conversation.unread_for(&user.id) > 0 {
            data.mark_conversation_read(&conversation.id)?;
        }

        let messages = data
            .get_messages_by_conversation_id(&conversation.id)
            .into_iter()
            .cloned()
            .collect();
        let conversation = data
            .get_conversation_by_id(&conversation.id)
            .cloned()
            .unwrap_or(conversation);
        Ok(ConversationView {
            conversation,
            messages,
        })
    }

    /// Sends `text` as the signed-in user.
    pub async fn send_message(&self, conversation_id: &str, text: &str) -> Result<Message> {
        let user = self.ctx.require_user(&[]).await?;
        let text = text.trim();
        if text.is_empty() {
            return Err(FacilitaError::validation("message text is required"));
        }

        let mut data = self.ctx.data().write().await;
        let conversation = data
            .get_conversation_by_id(conversation_id)
            .ok_or_else(|| FacilitaError::not_found("conversation", conversation_id))?;
        ensure_participant(conversation, &user)?;
        data.send_message(conversation_id, &user.id, text)
    }

    /// The signed-in user's conversations, most recently active first.
    pub async fn inbox(&self) -> Result<Vec<Conversation>> {
        let user = self.ctx.require_user(&[]).await?;
        let data = self.ctx.data().read().await;
        Ok(data
            .get_conversations_for_user(&user.id)
            .into_iter()
            .cloned()
            .collect())
    }
}

fn ensure_participant(conversation: &Conversation, user: &User) -> Result<()> {
    if conversation.has_participant(&user.id) {
        Ok(())
    } else {
        Err(FacilitaError::forbidden(user.role))
    }
}
