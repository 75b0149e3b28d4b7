//! Frames exchanged over the per-incident chat WebSocket.

use serde::{Deserialize, Serialize};

/// Frames the client sends to `/ws/chat/{incident_id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundFrame {
    /// A chat message; the backend stores it and relays it to the other participants.
    Message { content: String },
    /// Typing indicator.
    Typing { is_typing: bool },
}

/// Frames the backend pushes to connected clients, shaped `{"type": .., "data": {..}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum InboundFrame {
    NewMessage(MessageEvent),
    Typing(TypingEvent),
    UserStatus(UserStatusEvent),
    MessageRead(MessageReadEvent),
    Emergency(EmergencyEvent),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageEvent {
    pub id: i64,
    pub content: String,
    pub sender_id: i64,
    pub sent_at: String,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub is_emergency: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypingEvent {
    pub user_id: i64,
    pub is_typing: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStatusEvent {
    pub user_id: i64,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageReadEvent {
    pub message_id: i64,
    pub read_by: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyEvent {
    pub id: i64,
    pub content: String,
    pub sender_id: i64,
    #[serde(default)]
    pub sender_name: Option<String>,
    pub sent_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_outbound_message_shape() {
        let frame = OutboundFrame::Message {
            content: "hello".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&frame).unwrap(),
            json!({"type": "message", "content": "hello"})
        );
    }

    #[test]
    fn test_outbound_typing_shape() {
        let frame = OutboundFrame::Typing { is_typing: true };
        assert_eq!(
            serde_json::to_value(&frame).unwrap(),
            json!({"type": "typing", "is_typing": true})
        );
    }

    #[test]
    fn test_inbound_new_message() {
        let frame: InboundFrame = serde_json::from_value(json!({
            "type": "new_message",
            "data": {
                "id": 7,
                "content": "on our way",
                "sender_id": 3,
                "sent_at": "2024-05-01T10:00:00.123456",
                "is_read": false
            }
        }))
        .unwrap();

        match frame {
            InboundFrame::NewMessage(msg) => {
                assert_eq!(msg.id, 7);
                assert_eq!(msg.content, "on our way");
                assert!(!msg.is_emergency);
            }
            other => panic!("unexpected frame: {:?}", other),
        }
    }

    #[test]
    fn test_inbound_unknown_type_is_rejected() {
        let result = serde_json::from_value::<InboundFrame>(json!({"type": "presence", "data": {}}));
        assert!(result.is_err());
    }
}
