//! Moderation Gate contract.
//!
//! The broker only depends on this trait; concrete classifiers live in
//! `infrastructure::moderation`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{ChatMessage, MessageContent, error::ModerationError};

/// Content delivered in place of any rejected message
pub const MODERATION_NOTICE: &str = "This message was hidden by AI moderation.";

/// Outcome of classifying one message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModerationDecision {
    /// Deliver verbatim
    Approved,
    /// Deliver the moderation notice instead, under the same username
    Rejected,
}

impl ModerationDecision {
    /// Produce the message that should actually reach the room.
    pub fn apply(self, message: ChatMessage) -> ChatMessage {
        match self {
            ModerationDecision::Approved => message,
            ModerationDecision::Rejected => ChatMessage::new(message.username, notice()),
        }
    }
}

fn notice() -> MessageContent {
    MessageContent::from_static(MODERATION_NOTICE)
}

/// Synchronous text classifier consulted before a message is enqueued.
///
/// Implementations may be slow or fail; callers treat a failure as "drop the
/// message" and must not hold any room lock while awaiting it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModerationGate: Send + Sync {
    async fn classify(&self, text: &str) -> Result<ModerationDecision, ModerationError>;
}
