//! Ports - interfaces to external collaborators.
//!
//! The dialogue and search core reaches the messaging transport, the tour
//! inventory provider and the AI classification fallback only through the
//! traits defined here.

mod country_classifier;
mod inventory_provider;
mod transport;

pub use country_classifier::{ClassifierError, CountryClassifier};
pub use inventory_provider::{InventoryProvider, ProviderError};
pub use transport::{InboundMessage, Transport, TransportError};
