//! WebSocket frame DTOs.

use serde::{Deserialize, Serialize};

use crate::domain::{ChatMessage, MessageContent, Username, ValueObjectError};

/// Chat frame, identical in both directions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatFrame {
    pub username: String,
    pub content: String,
}

impl From<ChatMessage> for ChatFrame {
    fn from(message: ChatMessage) -> Self {
        Self {
            username: message.username.into_string(),
            content: message.content.into_string(),
        }
    }
}

impl TryFrom<ChatFrame> for ChatMessage {
    type Error = ValueObjectError;

    fn try_from(frame: ChatFrame) -> Result<Self, Self::Error> {
        Ok(ChatMessage::new(
            Username::try_from(frame.username)?,
            MessageContent::try_from(frame.content)?,
        ))
    }
}

/// Sent only to the connection whose inbound frame was rejected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorFrame {
    pub error: String,
}
