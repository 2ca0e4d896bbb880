//! Application layer - wires dialogue, search and delivery together.

mod orchestrator;
mod router;
mod session_registry;

pub use orchestrator::{SearchError, SearchOrchestrator};
pub use router::MessageRouter;
pub use session_registry::{Session, SessionRegistry};
