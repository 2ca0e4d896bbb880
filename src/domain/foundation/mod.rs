//! Foundation module - Shared domain primitives.
//!
//! Contains the identifier value objects that form the vocabulary of the
//! tour search domain.

mod ids;

pub use ids::{ConversationId, CountryId, DepartureId, MessageId, RequestId, UserId};
