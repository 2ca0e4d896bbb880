//! Chat delivery configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Outbound message shaping and per-conversation bookkeeping.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    /// Hard per-message character limit of the transport
    #[serde(default = "default_max_message_chars")]
    pub max_message_chars: usize,

    /// Target size of one chunk when a long digest is split
    #[serde(default = "default_chunk_chars")]
    pub chunk_chars: usize,

    /// Exchanges remembered per conversation
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl ChatConfig {
    /// Validate chat configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.chunk_chars == 0 || self.chunk_chars > self.max_message_chars {
            return Err(ValidationError::InvalidChunkSize);
        }
        Ok(())
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_message_chars: default_max_message_chars(),
            chunk_chars: default_chunk_chars(),
            history_limit: default_history_limit(),
        }
    }
}

fn default_max_message_chars() -> usize {
    2000
}

fn default_chunk_chars() -> usize {
    1800
}

fn default_history_limit() -> usize {
    20
}
