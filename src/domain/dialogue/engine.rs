//! Dialogue Engine - one handler per conversation state.
//!
//! Every handler validates raw input against its own domain, writes the
//! collected value and advances on success, or re-emits the same prompt
//! without touching state on failure (retry-in-place). The engine performs
//! no network I/O of its own; the one external call (the AI classification
//! fallback) is buried inside the resolver, and the finished parameters
//! leave the engine as an outward [`EngineReply::SearchReady`] signal rather
//! than a call into the search layer.

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::Utc;

use crate::domain::catalog::{DepartureCatalog, TripLength};
use crate::domain::resolver::CountryResolver;

use super::params::{SearchParameters, MAX_ADULTS, MAX_CHILDREN, MIN_ADULTS};
use super::prompts;
use super::state::{ConversationState, CountryCandidate, ParamsDraft, Phase};

/// Resolver confidence at or above which a country is accepted silently.
const ACCEPT_CONFIDENCE: f64 = 0.8;
/// Resolver confidence at or above which the user is asked to confirm.
const CLARIFY_CONFIDENCE: f64 = 0.6;

/// Universal commands that reset the dialogue from any state.
const RESET_COMMANDS: [&str; 2] = ["новый поиск", "new search"];
/// Affirmative confirmation tokens.
const YES_TOKENS: [&str; 4] = ["да", "yes", "y", "+"];
/// Negative confirmation tokens.
const NO_TOKENS: [&str; 4] = ["нет", "no", "n", "-"];

/// What the engine hands back for one inbound turn.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineReply {
    /// Text to deliver into the conversation.
    Prompt(String),
    /// All parameters collected and confirmed; start a search.
    SearchReady(SearchParameters),
}

/// One remembered exchange, for the bounded chat-history log.
#[derive(Debug, Clone, PartialEq)]
struct Exchange {
    user: String,
    reply: String,
}

/// The per-conversation finite-state controller.
pub struct DialogueEngine {
    state: ConversationState,
    resolver: Arc<CountryResolver>,
    departures: DepartureCatalog,
    history: VecDeque<Exchange>,
    history_limit: usize,
}

impl DialogueEngine {
    pub fn new(resolver: Arc<CountryResolver>, departures: DepartureCatalog) -> Self {
        Self {
            state: ConversationState::Init,
            resolver,
            departures,
            history: VecDeque::new(),
            history_limit: 20,
        }
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self.history.truncate(limit);
        self
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Returns the dialogue to its initial state, discarding everything.
    pub fn reset(&mut self) {
        self.state = ConversationState::Init;
    }

    /// Processes one inbound turn.
    ///
    /// `None` input re-emits the current question without mutating state
    /// (except from `Init`, where the greeting itself opens the dialogue).
    pub async fn handle(&mut self, input: Option<&str>) -> EngineReply {
        let reply = match input {
            None => self.repeat_prompt(),
            Some(text) => {
                let text = text.trim();
                if is_reset_command(text) {
                    self.reset();
                    self.state = ConversationState::AskDeparture;
                    EngineReply::Prompt(prompts::greeting(&self.departures))
                } else {
                    let from = self.state.phase();
                    let reply = self.step(text).await;
                    debug_assert!(
                        from.can_transition_to(self.state.phase()),
                        "illegal transition {:?} -> {:?}",
                        from,
                        self.state.phase()
                    );
                    self.remember(text, &reply);
                    reply
                }
            }
        };

        reply
    }

    /// The prompt for the current question, with no state change.
    fn repeat_prompt(&mut self) -> EngineReply {
        let text = match &self.state {
            ConversationState::Init => {
                self.state = ConversationState::AskDeparture;
                prompts::greeting(&self.departures)
            }
            ConversationState::AskDeparture => prompts::departure_question(&self.departures),
            ConversationState::AskCountry { pending, .. } => match pending {
                Some(candidate) => prompts::country_disambiguation(&candidate.display_name),
                None => prompts::country_question(self.resolver.catalog()),
            },
            ConversationState::AskTripLength { .. } => prompts::trip_length_question(),
            ConversationState::AskAdults { .. } => prompts::adults_question(),
            ConversationState::AskChildren { .. } => prompts::children_question(),
            ConversationState::Confirm { draft } => self.confirmation_prompt(draft),
            ConversationState::Searching => prompts::search_in_progress(),
        };
        EngineReply::Prompt(text)
    }

    async fn step(&mut self, text: &str) -> EngineReply {
        let state = std::mem::replace(&mut self.state, ConversationState::Init);
        let (next, reply) = self.transition(state, text).await;
        self.state = next;
        reply
    }

    async fn transition(
        &self,
        state: ConversationState,
        text: &str,
    ) -> (ConversationState, EngineReply) {
        match state {
            ConversationState::Init => (
                ConversationState::AskDeparture,
                EngineReply::Prompt(prompts::greeting(&self.departures)),
            ),

            ConversationState::AskDeparture => match self.departures.id_by_option(text) {
                Some(departure) => (
                    ConversationState::AskCountry {
                        departure: departure.clone(),
                        pending: None,
                    },
                    EngineReply::Prompt(prompts::country_question(self.resolver.catalog())),
                ),
                None => (
                    ConversationState::AskDeparture,
                    EngineReply::Prompt(prompts::departure_retry(&self.departures)),
                ),
            },

            ConversationState::AskCountry {
                departure,
                pending: None,
            } => self.handle_country(departure, text).await,

            ConversationState::AskCountry {
                departure,
                pending: Some(candidate),
            } => self.handle_country_disambiguation(departure, candidate, text),

            ConversationState::AskTripLength { departure, country } => {
                match TripLength::from_option(text) {
                    Some(trip_length) => (
                        ConversationState::AskAdults {
                            departure,
                            country,
                            trip_length,
                        },
                        EngineReply::Prompt(prompts::adults_question()),
                    ),
                    None => (
                        ConversationState::AskTripLength { departure, country },
                        EngineReply::Prompt(prompts::trip_length_retry()),
                    ),
                }
            }

            ConversationState::AskAdults {
                departure,
                country,
                trip_length,
            } => match parse_count(text, MIN_ADULTS, MAX_ADULTS) {
                Some(adults) => (
                    ConversationState::AskChildren {
                        departure,
                        country,
                        trip_length,
                        adults,
                    },
                    EngineReply::Prompt(prompts::children_question()),
                ),
                None => (
                    ConversationState::AskAdults {
                        departure,
                        country,
                        trip_length,
                    },
                    EngineReply::Prompt(prompts::adults_retry()),
                ),
            },

            ConversationState::AskChildren {
                departure,
                country,
                trip_length,
                adults,
            } => match parse_count(text, 0, MAX_CHILDREN) {
                Some(children) => {
                    let draft = ParamsDraft {
                        departure,
                        country,
                        trip_length,
                        adults,
                        children,
                        date_from: None,
                        date_to: None,
                    };
                    let prompt = self.confirmation_prompt(&draft);
                    (
                        ConversationState::Confirm { draft },
                        EngineReply::Prompt(prompt),
                    )
                }
                None => (
                    ConversationState::AskChildren {
                        departure,
                        country,
                        trip_length,
                        adults,
                    },
                    EngineReply::Prompt(prompts::children_retry()),
                ),
            },

            ConversationState::Confirm { draft } => self.handle_confirmation(draft, text),

            ConversationState::Searching => (
                ConversationState::Searching,
                EngineReply::Prompt(prompts::search_in_progress()),
            ),
        }
    }

    async fn handle_country(
        &self,
        departure: crate::domain::foundation::DepartureId,
        text: &str,
    ) -> (ConversationState, EngineReply) {
        let resolution = self.resolver.resolve(text).await;

        match resolution.country {
            Some(country) if resolution.confidence >= ACCEPT_CONFIDENCE => {
                tracing::debug!(
                    country = %country,
                    confidence = resolution.confidence,
                    "country accepted"
                );
                (
                    ConversationState::AskTripLength { departure, country },
                    EngineReply::Prompt(prompts::trip_length_question()),
                )
            }
            Some(country) if resolution.confidence >= CLARIFY_CONFIDENCE => {
                let display_name = self
                    .resolver
                    .catalog()
                    .display_name(&country)
                    .unwrap_or(country.as_str())
                    .to_string();
                let prompt = prompts::country_disambiguation(&display_name);
                (
                    ConversationState::AskCountry {
                        departure,
                        pending: Some(CountryCandidate {
                            id: country,
                            display_name,
                        }),
                    },
                    EngineReply::Prompt(prompt),
                )
            }
            _ => (
                ConversationState::AskCountry {
                    departure,
                    pending: None,
                },
                EngineReply::Prompt(prompts::country_retry(self.resolver.catalog())),
            ),
        }
    }

    fn handle_country_disambiguation(
        &self,
        departure: crate::domain::foundation::DepartureId,
        candidate: CountryCandidate,
        text: &str,
    ) -> (ConversationState, EngineReply) {
        if is_affirmative(text) {
            (
                ConversationState::AskTripLength {
                    departure,
                    country: candidate.id,
                },
                EngineReply::Prompt(prompts::trip_length_question()),
            )
        } else if is_negative(text) {
            (
                ConversationState::AskCountry {
                    departure,
                    pending: None,
                },
                EngineReply::Prompt(prompts::country_question(self.resolver.catalog())),
            )
        } else {
            let prompt = prompts::country_disambiguation(&candidate.display_name);
            (
                ConversationState::AskCountry {
                    departure,
                    pending: Some(candidate),
                },
                EngineReply::Prompt(prompt),
            )
        }
    }

    fn handle_confirmation(
        &self,
        draft: ParamsDraft,
        text: &str,
    ) -> (ConversationState, EngineReply) {
        if is_affirmative(text) {
            match draft.finalize(Utc::now().date_naive()) {
                Ok(params) => (ConversationState::Searching, EngineReply::SearchReady(params)),
                Err(err) => {
                    // Unreachable with draft fields validated per question,
                    // but a broken draft must not submit a search.
                    tracing::error!(error = %err, "draft finalization failed");
                    (
                        ConversationState::AskDeparture,
                        EngineReply::Prompt(prompts::restart(&self.departures)),
                    )
                }
            }
        } else if is_negative(text) {
            (
                ConversationState::AskDeparture,
                EngineReply::Prompt(prompts::restart(&self.departures)),
            )
        } else {
            (
                ConversationState::Confirm { draft },
                EngineReply::Prompt(prompts::yes_no_retry()),
            )
        }
    }

    fn confirmation_prompt(&self, draft: &ParamsDraft) -> String {
        let window = match (draft.date_from, draft.date_to) {
            (Some(from), Some(to)) => (from, to),
            _ => SearchParameters::default_date_window(Utc::now().date_naive()),
        };
        prompts::confirmation(draft, &self.departures, self.resolver.catalog(), window)
    }

    fn remember(&mut self, user: &str, reply: &EngineReply) {
        let reply_text = match reply {
            EngineReply::Prompt(text) => text.clone(),
            EngineReply::SearchReady(_) => "[поиск запущен]".to_string(),
        };
        self.history.push_back(Exchange {
            user: user.to_string(),
            reply: reply_text,
        });
        while self.history.len() > self.history_limit {
            self.history.pop_front();
        }
    }

    /// Number of remembered exchanges (bounded by the history limit).
    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

fn is_reset_command(text: &str) -> bool {
    let lowered = text.to_lowercase();
    RESET_COMMANDS.iter().any(|cmd| *cmd == lowered)
}

fn is_affirmative(text: &str) -> bool {
    let lowered = text.to_lowercase();
    YES_TOKENS.iter().any(|t| *t == lowered)
}

fn is_negative(text: &str) -> bool {
    let lowered = text.to_lowercase();
    NO_TOKENS.iter().any(|t| *t == lowered)
}

fn parse_count(text: &str, min: u8, max: u8) -> Option<u8> {
    text.trim()
        .parse::<u8>()
        .ok()
        .filter(|n| (min..=max).contains(n))
}
