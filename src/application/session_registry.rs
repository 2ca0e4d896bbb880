//! Session Registry - one dialogue engine per conversation.
//!
//! The registry is shared across all inbound-message tasks. Lookup takes a
//! read lock; only a genuinely new conversation upgrades to a write lock,
//! and `entry().or_insert_with()` under that lock makes creation
//! insert-if-absent: two racing first messages converge on the same
//! session. Sessions are never evicted.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::domain::catalog::DepartureCatalog;
use crate::domain::dialogue::DialogueEngine;
use crate::domain::foundation::{ConversationId, MessageId};
use crate::domain::resolver::CountryResolver;

/// Per-conversation state: the dialogue engine plus delivery bookkeeping.
pub struct Session {
    pub engine: DialogueEngine,
    /// Latest processed inbound message, for duplicate suppression.
    pub last_message_id: Option<MessageId>,
}

impl Session {
    fn new(engine: DialogueEngine) -> Self {
        Self {
            engine,
            last_message_id: None,
        }
    }

    /// True when this message id was already processed.
    pub fn is_duplicate(&self, message_id: &MessageId) -> bool {
        self.last_message_id.as_ref() == Some(message_id)
    }
}

/// Concurrent map of conversations to their sessions.
pub struct SessionRegistry {
    resolver: Arc<CountryResolver>,
    departures: DepartureCatalog,
    history_limit: usize,
    sessions: RwLock<HashMap<ConversationId, Arc<Mutex<Session>>>>,
}

impl SessionRegistry {
    pub fn new(resolver: Arc<CountryResolver>, departures: DepartureCatalog) -> Self {
        Self {
            resolver,
            departures,
            history_limit: 20,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Returns the session for a conversation, creating it on first contact.
    pub async fn get_or_create(&self, conversation: &ConversationId) -> Arc<Mutex<Session>> {
        if let Some(session) = self.sessions.read().await.get(conversation) {
            return session.clone();
        }

        let mut sessions = self.sessions.write().await;
        sessions
            .entry(conversation.clone())
            .or_insert_with(|| {
                tracing::info!(conversation = %conversation, "new conversation");
                let engine = DialogueEngine::new(self.resolver.clone(), self.departures.clone())
                    .with_history_limit(self.history_limit);
                Arc::new(Mutex::new(Session::new(engine)))
            })
            .clone()
    }

    /// Returns the conversation's dialogue to its initial state.
    ///
    /// Unknown conversations are a no-op; duplicate-suppression memory is
    /// kept so a redelivery straddling the reset stays suppressed.
    pub async fn reset(&self, conversation: &ConversationId) {
        let session = match self.sessions.read().await.get(conversation) {
            Some(session) => session.clone(),
            None => return,
        };
        tracing::info!(conversation = %conversation, "dialogue reset");
        session.lock().await.engine.reset();
    }

    /// Number of live conversations.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
