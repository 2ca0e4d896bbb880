//! Console Transport - stdout delivery for local runs.

use async_trait::async_trait;
use tokio::io::{self, AsyncWriteExt};

use crate::domain::foundation::ConversationId;
use crate::ports::{Transport, TransportError};

use super::chunker::split_message;

/// Writes outbound messages to stdout, one chunk at a time.
pub struct ConsoleTransport {
    max_message_chars: usize,
    chunk_chars: usize,
}

impl ConsoleTransport {
    pub fn new(max_message_chars: usize, chunk_chars: usize) -> Self {
        Self {
            max_message_chars,
            chunk_chars,
        }
    }
}

#[async_trait]
impl Transport for ConsoleTransport {
    async fn send_text(
        &self,
        conversation: &ConversationId,
        text: &str,
    ) -> Result<(), TransportError> {
        let mut stdout = io::stdout();
        for chunk in split_message(text, self.max_message_chars, self.chunk_chars) {
            let line = format!("[{}] {}\n", conversation, chunk);
            stdout
                .write_all(line.as_bytes())
                .await
                .map_err(|e| TransportError::delivery(e.to_string()))?;
        }
        stdout
            .flush()
            .await
            .map_err(|e| TransportError::delivery(e.to_string()))?;
        Ok(())
    }
}
