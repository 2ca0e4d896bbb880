//! Message Router - inbound intake, dedup and search hand-off.
//!
//! One inbound message maps to one session turn: the router locks the
//! conversation's session, suppresses a repeat of the latest message id,
//! runs the dialogue engine and delivers the reply. A `SearchReady` turn
//! additionally spawns the search task so intake never blocks on the
//! polling loop; the task delivers the digest (or an apology), then resets
//! the dialogue for the next search.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::domain::dialogue::EngineReply;
use crate::domain::foundation::ConversationId;
use crate::domain::search::format_digest;
use crate::ports::{InboundMessage, Transport};

use super::orchestrator::{SearchError, SearchOrchestrator};
use super::session_registry::SessionRegistry;

const SEARCH_STARTED: &str = "🔍 Начинаю поиск туров! Это может занять около минуты...";
const SEARCH_TIMED_OUT: &str =
    "😔 Поиск занял слишком много времени. Попробуйте, пожалуйста, позже.";
const SEARCH_FAILED: &str =
    "😔 К сожалению, поиск не удался. Напишите 'новый поиск', чтобы попробовать ещё раз.";
const NEXT_SEARCH_HINT: &str = "Напишите 'новый поиск', чтобы найти что-то ещё. ✈️";

/// Routes inbound messages to sessions and searches to the orchestrator.
pub struct MessageRouter {
    registry: Arc<SessionRegistry>,
    orchestrator: Arc<SearchOrchestrator>,
    transport: Arc<dyn Transport>,
}

impl MessageRouter {
    pub fn new(
        registry: Arc<SessionRegistry>,
        orchestrator: Arc<SearchOrchestrator>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            registry,
            orchestrator,
            transport,
        }
    }

    /// Processes one inbound message.
    ///
    /// Returns the handle of the spawned search task when this turn started
    /// one, so callers can synchronize on search completion.
    pub async fn handle_message(&self, message: InboundMessage) -> Option<JoinHandle<()>> {
        let session = self.registry.get_or_create(&message.conversation).await;
        let mut guard = session.lock().await;

        if guard.is_duplicate(&message.message_id) {
            tracing::debug!(
                conversation = %message.conversation,
                message_id = %message.message_id,
                "duplicate message suppressed"
            );
            return None;
        }
        guard.last_message_id = Some(message.message_id.clone());

        match guard.engine.handle(Some(message.text.as_str())).await {
            EngineReply::Prompt(text) => {
                drop(guard);
                self.deliver(&message.conversation, &text).await;
                None
            }
            EngineReply::SearchReady(params) => {
                drop(guard);
                self.deliver(&message.conversation, SEARCH_STARTED).await;

                let orchestrator = self.orchestrator.clone();
                let transport = self.transport.clone();
                let registry = self.registry.clone();
                let conversation = message.conversation.clone();
                Some(tokio::spawn(async move {
                    run_search(orchestrator, transport, registry, conversation, params).await;
                }))
            }
        }
    }

    async fn deliver(&self, conversation: &ConversationId, text: &str) {
        if let Err(err) = self.transport.send_text(conversation, text).await {
            tracing::error!(conversation = %conversation, error = %err, "delivery failed");
        }
    }
}

/// The spawned per-search task: run the job, deliver the outcome, reset the
/// dialogue so the conversation can start over.
async fn run_search(
    orchestrator: Arc<SearchOrchestrator>,
    transport: Arc<dyn Transport>,
    registry: Arc<SessionRegistry>,
    conversation: ConversationId,
    params: crate::domain::dialogue::SearchParameters,
) {
    let outcome = orchestrator.run(&params).await;

    let message = match &outcome {
        Ok(results) => {
            format!("{}\n{}", format_digest(results), NEXT_SEARCH_HINT)
        }
        Err(SearchError::Timeout { attempts }) => {
            tracing::warn!(conversation = %conversation, attempts, "search timed out");
            SEARCH_TIMED_OUT.to_string()
        }
        Err(err) => {
            tracing::error!(conversation = %conversation, error = %err, "search failed");
            SEARCH_FAILED.to_string()
        }
    };

    if let Err(err) = transport.send_text(&conversation, &message).await {
        tracing::error!(conversation = %conversation, error = %err, "delivery failed");
    }

    registry.reset(&conversation).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::transport::InMemoryTransport;
    use crate::domain::catalog::{CountryCatalog, DepartureCatalog};
    use crate::domain::dialogue::{Phase, SearchParameters};
    use crate::domain::foundation::{MessageId, RequestId, UserId};
    use crate::domain::resolver::CountryResolver;
    use crate::domain::search::{HotelOffer, JobState, JobStatus, PollPolicy, SearchResults};
    use crate::ports::{InventoryProvider, ProviderError};
    use async_trait::async_trait;
    use std::time::Duration;

    /// Provider that finishes on the first poll.
    struct InstantProvider {
        fail: bool,
    }

    #[async_trait]
    impl InventoryProvider for InstantProvider {
        async fn submit(&self, _params: &SearchParameters) -> Result<RequestId, ProviderError> {
            if self.fail {
                Err(ProviderError::rejected("нет доступа"))
            } else {
                Ok(RequestId::new("req-1"))
            }
        }

        async fn status(&self, _request: &RequestId) -> Result<JobStatus, ProviderError> {
            Ok(JobStatus::new(JobState::Finished, 2, 6).with_min_price(42_000))
        }

        async fn fetch(&self, _request: &RequestId) -> Result<SearchResults, ProviderError> {
            Ok(SearchResults {
                status: JobStatus::new(JobState::Finished, 2, 6).with_min_price(42_000),
                hotels: vec![
                    HotelOffer {
                        name: "Grand Resort".to_string(),
                        stars: 5,
                        price: Some(65_000),
                        country: "Турция".to_string(),
                        region: "Анталья".to_string(),
                        rating: 4.7,
                        description: None,
                    },
                    HotelOffer {
                        name: "Sunny Beach".to_string(),
                        stars: 4,
                        price: Some(42_000),
                        country: "Турция".to_string(),
                        region: "Кемер".to_string(),
                        rating: 4.1,
                        description: None,
                    },
                ],
            })
        }
    }

    struct Fixture {
        router: MessageRouter,
        registry: Arc<SessionRegistry>,
        transport: Arc<InMemoryTransport>,
    }

    fn fixture(fail_search: bool) -> Fixture {
        let resolver = Arc::new(CountryResolver::new(CountryCatalog::builtin()));
        let registry = Arc::new(SessionRegistry::new(resolver, DepartureCatalog::builtin()));
        let transport = Arc::new(InMemoryTransport::new());
        let orchestrator = Arc::new(SearchOrchestrator::new(
            Arc::new(InstantProvider { fail: fail_search }),
            PollPolicy::new(3, Duration::ZERO, 10, 30),
        ));
        let router = MessageRouter::new(registry.clone(), orchestrator, transport.clone());
        Fixture {
            router,
            registry,
            transport,
        }
    }

    fn message(conversation: &str, id: &str, text: &str) -> InboundMessage {
        InboundMessage::new(
            ConversationId::new(conversation),
            UserId::new("user-1"),
            MessageId::new(id),
            text,
        )
    }

    async fn drive(fixture: &Fixture, conversation: &str, turns: &[&str]) -> Option<JoinHandle<()>> {
        let mut handle = None;
        for (i, text) in turns.iter().enumerate() {
            handle = fixture
                .router
                .handle_message(message(conversation, &format!("m{i}"), text))
                .await;
        }
        handle
    }

    const HAPPY_PATH: [&str; 7] = ["привет", "1", "Турция", "2", "2", "0", "да"];

    #[tokio::test]
    async fn test_full_flow_delivers_digest_and_resets() {
        let fixture = fixture(false);

        let handle = drive(&fixture, "chat", &HAPPY_PATH).await;
        handle.expect("confirmation starts a search").await.unwrap();

        let sent = fixture.transport.sent_to(&ConversationId::new("chat"));
        assert!(sent.iter().any(|m| m.contains("Привет")));
        assert!(sent.iter().any(|m| m.contains("Начинаю поиск")));
        let digest = sent.last().unwrap();
        assert!(digest.contains("Найдено"));
        assert!(digest.contains("1. Sunny Beach"));
        assert!(digest.contains("2. Grand Resort"));
        assert!(digest.contains("новый поиск"));

        // The dialogue is back at the start for a fresh search.
        let session = fixture
            .registry
            .get_or_create(&ConversationId::new("chat"))
            .await;
        assert_eq!(session.lock().await.engine.phase(), Phase::Init);
    }

    #[tokio::test]
    async fn test_duplicate_message_id_suppressed() {
        let fixture = fixture(false);

        fixture
            .router
            .handle_message(message("chat", "same-id", "привет"))
            .await;
        fixture
            .router
            .handle_message(message("chat", "same-id", "привет"))
            .await;

        let sent = fixture.transport.sent_to(&ConversationId::new("chat"));
        assert_eq!(sent.len(), 1, "repeat delivery must not re-run the turn");
    }

    #[tokio::test]
    async fn test_same_text_with_new_id_processed() {
        let fixture = fixture(false);

        fixture
            .router
            .handle_message(message("chat", "id-1", "привет"))
            .await;
        fixture
            .router
            .handle_message(message("chat", "id-2", "мимо"))
            .await;

        let sent = fixture.transport.sent_to(&ConversationId::new("chat"));
        assert_eq!(sent.len(), 2);
    }

    #[tokio::test]
    async fn test_failed_search_apologizes_and_resets() {
        let fixture = fixture(true);

        let handle = drive(&fixture, "chat", &HAPPY_PATH).await;
        handle.expect("confirmation starts a search").await.unwrap();

        let sent = fixture.transport.sent_to(&ConversationId::new("chat"));
        assert!(sent.last().unwrap().contains("не удался"));

        let session = fixture
            .registry
            .get_or_create(&ConversationId::new("chat"))
            .await;
        assert_eq!(session.lock().await.engine.phase(), Phase::Init);
    }

    #[tokio::test]
    async fn test_conversations_are_isolated() {
        let fixture = fixture(false);

        drive(&fixture, "a", &["привет", "1"]).await;
        drive(&fixture, "b", &["привет"]).await;

        let a = fixture
            .registry
            .get_or_create(&ConversationId::new("a"))
            .await;
        let b = fixture
            .registry
            .get_or_create(&ConversationId::new("b"))
            .await;
        assert_eq!(a.lock().await.engine.phase(), Phase::AskCountry);
        assert_eq!(b.lock().await.engine.phase(), Phase::AskDeparture);
    }
}
