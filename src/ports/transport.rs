//! Transport Port - Interface to the chat messaging platform.
//!
//! The concrete platform (message delivery, read-state tracking, rate
//! limits) stays outside the core. Inbound messages arrive as
//! [`InboundMessage`] tuples with at-least-once delivery: the application
//! layer suppresses repeats of the latest message id per conversation.

use async_trait::async_trait;

use crate::domain::foundation::{ConversationId, MessageId, UserId};

/// Port for delivering text into a conversation.
///
/// Implementations own chunking: output exceeding the platform limit is
/// split into transport-sized pieces before delivery.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send_text(
        &self,
        conversation: &ConversationId,
        text: &str,
    ) -> Result<(), TransportError>;
}

/// One inbound message received from the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub conversation: ConversationId,
    pub user: UserId,
    pub message_id: MessageId,
    pub text: String,
}

impl InboundMessage {
    pub fn new(
        conversation: ConversationId,
        user: UserId,
        message_id: MessageId,
        text: impl Into<String>,
    ) -> Self {
        Self {
            conversation,
            user,
            message_id,
            text: text.into(),
        }
    }
}

/// Transport delivery errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    #[error("delivery failed: {0}")]
    Delivery(String),
}

impl TransportError {
    pub fn delivery(message: impl Into<String>) -> Self {
        Self::Delivery(message.into())
    }
}
