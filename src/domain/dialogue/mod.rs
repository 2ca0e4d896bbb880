//! Dialogue module - the finite-state conversation controller.
//!
//! [`DialogueEngine`] owns one conversation's state and turns inbound text
//! into the next prompt or a ready-to-search signal.

mod engine;
mod params;
mod prompts;
mod state;

pub use engine::{DialogueEngine, EngineReply};
pub use params::{ParamsError, SearchParameters, MAX_ADULTS, MAX_CHILDREN, MIN_ADULTS};
pub use state::{ConversationState, CountryCandidate, ParamsDraft, Phase};
