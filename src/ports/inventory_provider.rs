//! Inventory Provider Port - Interface to the external tour-search service.
//!
//! The provider runs searches asynchronously: a submission yields an opaque
//! request id, the job is then polled for status counters and finally the
//! collected hotel records are fetched. Implementations translate between
//! the provider's wire format and the domain types.

use async_trait::async_trait;

use crate::domain::dialogue::SearchParameters;
use crate::domain::foundation::RequestId;
use crate::domain::search::{JobStatus, SearchResults};

/// Port for the external tour-inventory service.
#[async_trait]
pub trait InventoryProvider: Send + Sync {
    /// Submits a new search job, returning its opaque request id.
    ///
    /// A provider-reported error payload surfaces as
    /// [`ProviderError::Rejected`], distinct from transport failures.
    async fn submit(&self, params: &SearchParameters) -> Result<RequestId, ProviderError>;

    /// Reads the current status counters of an in-flight job.
    async fn status(&self, request: &RequestId) -> Result<JobStatus, ProviderError>;

    /// Fetches the collected results of a converged job.
    async fn fetch(&self, request: &RequestId) -> Result<SearchResults, ProviderError>;
}

/// Inventory provider errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    /// The provider reported an explicit error payload (business error).
    #[error("provider rejected the request: {0}")]
    Rejected(String),

    /// Network-level failure reaching the provider.
    #[error("network error: {0}")]
    Network(String),

    /// The provider answered with something we could not parse.
    #[error("parse error: {0}")]
    Parse(String),

    /// The request exceeded its timeout.
    #[error("request timed out")]
    Timeout,
}

impl ProviderError {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Transient failures are swallowed per poll attempt; only
    /// [`ProviderError::Rejected`] aborts a polling loop outright.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ProviderError::Network(_) | ProviderError::Parse(_) | ProviderError::Timeout
        )
    }
}
