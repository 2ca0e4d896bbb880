//! Console entry point: a local chat loop over stdin/stdout.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tour_scout::adapters::ai::OpenAiClassifier;
use tour_scout::adapters::tourvisor::TourvisorClient;
use tour_scout::adapters::transport::ConsoleTransport;
use tour_scout::application::{MessageRouter, SearchOrchestrator, SessionRegistry};
use tour_scout::config::AppConfig;
use tour_scout::domain::catalog::{CountryCatalog, DepartureCatalog};
use tour_scout::domain::foundation::{ConversationId, MessageId, UserId};
use tour_scout::domain::resolver::CountryResolver;
use tour_scout::domain::search::PollPolicy;
use tour_scout::ports::InboundMessage;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tour_scout=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;
    config.validate()?;

    let mut resolver = CountryResolver::new(CountryCatalog::builtin());
    match OpenAiClassifier::from_config(&config.ai) {
        Some(classifier) => {
            tracing::info!(model = %config.ai.model, "AI country fallback enabled");
            resolver = resolver.with_classifier(Arc::new(classifier));
        }
        None => tracing::info!("AI country fallback disabled"),
    }
    let resolver = Arc::new(resolver);

    let registry = Arc::new(
        SessionRegistry::new(resolver, DepartureCatalog::builtin())
            .with_history_limit(config.chat.history_limit),
    );
    let provider = Arc::new(TourvisorClient::from_config(&config.tourvisor));
    let policy = PollPolicy::new(
        config.tourvisor.poll_attempts,
        config.tourvisor.poll_interval(),
        config.tourvisor.min_hotels,
        config.tourvisor.min_tours,
    );
    let orchestrator = Arc::new(SearchOrchestrator::new(provider, policy));
    let transport = Arc::new(ConsoleTransport::new(
        config.chat.max_message_chars,
        config.chat.chunk_chars,
    ));
    let router = MessageRouter::new(registry, orchestrator, transport);

    tracing::info!("console chat ready; type a message, or 'exit' to quit");

    let conversation = ConversationId::new("console");
    let user = UserId::new("local");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        if text.eq_ignore_ascii_case("exit") || text.eq_ignore_ascii_case("quit") {
            break;
        }

        let message = InboundMessage::new(
            conversation.clone(),
            user.clone(),
            MessageId::random(),
            text,
        );
        router.handle_message(message).await;
    }

    tracing::info!("shutting down");
    Ok(())
}
