//! Conversation and message domain models.

use serde::{Deserialize, Serialize};

/// The message thread bound to one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub request_id: String,
    /// Customer and provider of the request.
    pub participants: Vec<String>,
    /// Snapshot of the most recent message text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message_at: Option<String>,
    /// Author of the most recent message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_sender_id: Option<String>,
    /// Messages from `last_sender_id` the other participant has not read yet.
    #[serde(default)]
    pub unread_count: u32,
}

impl Conversation {
    pub fn has_participant(&self, user_id: &str) -> bool {
        self.participants.iter().any(|p| p == user_id)
    }

    /// Unread messages as seen by `user_id`. A user's own messages are never
    /// unread for them.
    pub fn unread_for(&self, user_id: &str) -> u32 {
        if self.last_sender_id.as_deref() == Some(user_id) {
            0
        } else {
            self.unread_count
        }
    }

    /// Records `message` as the latest one in the thread.
    ///
    /// A reply from the other participant means they have read the thread,
    /// so the counter restarts at one for the new sender.
    pub(crate) fn record_message(&mut self, message: &Message) {
        self.last_message = Some(message.content.clone());
        self.last_message_at = Some(message.created_at.clone());
        if self.last_sender_id.as_deref() == Some(message.sender_id.as_str()) {
            self.unread_count = self.unread_count.saturating_add(1);
        } else {
            self.last_sender_id = Some(message.sender_id.clone());
            self.unread_count = 1;
        }
    }
}

/// A single message. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub conversation_id: String,
    pub sender_id: String,
    pub content: String,
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_message_updates_snapshot() {
        let mut conversation = Conversation {
            id: "conv_1".to_string(),
            request_id: "req_1".to_string(),
            participants: vec!["c1".to_string(), "p1".to_string()],
            last_message: None,
            last_message_at: None,
            last_sender_id: None,
            unread_count: 0,
        };
        let message = Message {
            id: "msg_1".to_string(),
            conversation_id: "conv_1".to_string(),
            sender_id: "c1".to_string(),
            content: "Olá".to_string(),
            created_at: "2024-05-01T10:00:00.000Z".to_string(),
        };

        conversation.record_message(&message);

        assert_eq!(conversation.last_message.as_deref(), Some("Olá"));
        assert_eq!(
            conversation.last_message_at.as_deref(),
            Some("2024-05-01T10:00:00.000Z")
        );
        assert_eq!(conversation.unread_count, 1);
        assert!(conversation.has_participant("p1"));
    }

    #[test]
    fn test_unread_is_per_reader() {
        let mut conversation = Conversation {
            id: "conv_1".to_string(),
            request_id: "req_1".to_string(),
            participants: vec!["c1".to_string(), "p1".to_string()],
            last_message: None,
            last_message_at: None,
            last_sender_id: None,
            unread_count: 0,
        };
        let message = |sender: &str, content: &str| Message {
            id: format!("msg_{}", content),
            conversation_id: "conv_1".to_string(),
            sender_id: sender.to_string(),
            content: content.to_string(),
            created_at: "2024-05-01T10:00:00.000Z".to_string(),
        };

        conversation.record_message(&message("c1", "oi"));
        conversation.record_message(&message("c1", "está aí?"));
        assert_eq!(conversation.unread_for("c1"), 0);
        assert_eq!(conversation.unread_for("p1"), 2);

        conversation.record_message(&message("p1", "sim"));
        assert_eq!(conversation.unread_for("p1"), 0);
        assert_eq!(conversation.unread_for("c1"), 1);
    }

    #[test]
    fn test_missing_unread_count_defaults_to_zero() {
        let json = r#"{"id":"conv_1","request_id":"req_1","participants":["a","b"]}"#;
        let conversation: Conversation = serde_json::from_str(json).unwrap();
        assert_eq!(conversation.unread_count, 0);
        assert!(conversation.last_message.is_none());
    }
}
