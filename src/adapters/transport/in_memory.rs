//! In-Memory Transport - captures outbound messages for tests.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::foundation::ConversationId;
use crate::ports::{Transport, TransportError};

use super::chunker::split_message;

/// Records every chunk it would have delivered.
pub struct InMemoryTransport {
    sent: Mutex<Vec<(ConversationId, String)>>,
    max_message_chars: usize,
    chunk_chars: usize,
}

impl InMemoryTransport {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            max_message_chars: 2000,
            chunk_chars: 1800,
        }
    }

    /// All delivered chunks in order.
    pub fn sent(&self) -> Vec<(ConversationId, String)> {
        self.sent.lock().expect("transport mutex poisoned").clone()
    }

    /// Delivered texts for one conversation.
    pub fn sent_to(&self, conversation: &ConversationId) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter(|(c, _)| c == conversation)
            .map(|(_, text)| text)
            .collect()
    }
}

impl Default for InMemoryTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for InMemoryTransport {
    async fn send_text(
        &self,
        conversation: &ConversationId,
        text: &str,
    ) -> Result<(), TransportError> {
        let chunks = split_message(text, self.max_message_chars, self.chunk_chars);
        let mut sent = self.sent.lock().expect("transport mutex poisoned");
        for chunk in chunks {
            sent.push((conversation.clone(), chunk));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_messages_per_conversation() {
        let transport = InMemoryTransport::new();
        let a = ConversationId::new("a");
        let b = ConversationId::new("b");

        transport.send_text(&a, "первое").await.unwrap();
        transport.send_text(&b, "второе").await.unwrap();
        transport.send_text(&a, "третье").await.unwrap();

        assert_eq!(transport.sent_to(&a), vec!["первое", "третье"]);
        assert_eq!(transport.sent_to(&b), vec!["второе"]);
    }

    #[tokio::test]
    async fn test_long_message_recorded_in_chunks() {
        let transport = InMemoryTransport::new();
        let conv = ConversationId::new("a");

        transport.send_text(&conv, &"x".repeat(4000)).await.unwrap();

        let sent = transport.sent_to(&conv);
        assert!(sent.len() > 1);
        for chunk in sent {
            assert!(chunk.chars().count() <= 2000);
        }
    }
}
